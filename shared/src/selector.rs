//! Nearest-eligible-facility selection.
//!
//! This module is the pure core of the respawn decision: given the position a
//! player died at and a point-in-time survey of every registered facility,
//! pick the closest one the player is actually allowed to use.
//!
//! # Model
//! - A [`Candidate`] is an immutable snapshot of one facility's state, taken
//!   at event time with the requesting player already resolved into
//!   `relation`. Selection never touches live host objects.
//! - Eligibility short-circuits in a fixed order: subtype denylist, then the
//!   three health flags, then the owner relation.
//! - Distance is plain Euclidean distance; the scan is O(n) by design since
//!   n is tens of facilities, not thousands.
//!
//! # Determinism
//! The minimum is tracked with a strict less-than comparison, so for a fixed
//! input order the first candidate at the shortest distance always wins ties.

use crate::ident::FacilityId;
use nalgebra::Point3;

/// The requesting player's relation to a facility's owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnerRelation {
    /// The player owns the facility.
    Owner,
    /// The facility belongs to a faction member with sharing enabled.
    FactionShare,
    /// Nobody owns the facility.
    NoOwner,
    /// Owned by a neutral party.
    Neutral,
    /// Owned by a hostile party.
    Enemy,
}

impl OwnerRelation {
    /// Foreign facilities are off limits: Enemy and Neutral are rejected,
    /// everything else (Owner, FactionShare, NoOwner) may be used.
    #[inline]
    pub fn allows_use(self) -> bool {
        !matches!(self, OwnerRelation::Enemy | OwnerRelation::Neutral)
    }
}

/// Point-in-time state of one registered facility, as seen by the player
/// requesting a respawn.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Handle of the facility this snapshot was taken from.
    pub id: FacilityId,
    /// Facility world position at event time (facilities may be mobile).
    pub position: Point3<f64>,
    /// Structurally intact enough to operate.
    pub functional: bool,
    /// Currently doing its job.
    pub working: bool,
    /// Powered and switched on.
    pub powered_and_enabled: bool,
    /// Relation of the requesting player to the facility owner.
    pub relation: OwnerRelation,
    /// Host-side variant tag, matched against the configured denylist.
    pub subtype_tag: String,
}

/// Returns true if `candidate` may serve as a respawn point.
///
/// Predicates are checked cheapest-rejection-first and short-circuit:
/// 1. the subtype tag must not be denylisted (used to exclude facility
///    variants belonging to an incompatible alternate survival ruleset),
/// 2. all three health flags must hold,
/// 3. the owner relation must allow use.
#[inline]
pub fn is_eligible(candidate: &Candidate, denied_subtypes: &[String]) -> bool {
    if denied_subtypes.iter().any(|tag| *tag == candidate.subtype_tag) {
        return false;
    }

    if !candidate.functional || !candidate.working || !candidate.powered_and_enabled {
        return false;
    }

    candidate.relation.allows_use()
}

/// Picks the eligible candidate nearest to `death_position`.
///
/// Returns `None` when nothing passes the filter, leaving the host's default
/// spawn behavior in place. Ties go to the first candidate encountered in
/// `candidates` iteration order (strict `<` on distance).
pub fn select_nearest<'a>(
    death_position: &Point3<f64>,
    candidates: &'a [Candidate],
    denied_subtypes: &[String],
) -> Option<&'a Candidate> {
    let mut nearest: Option<(&Candidate, f64)> = None;

    for candidate in candidates {
        if !is_eligible(candidate, denied_subtypes) {
            continue;
        }

        let dist = (candidate.position - *death_position).norm();

        match nearest {
            Some((_, shortest)) if dist >= shortest => {}
            _ => nearest = Some((candidate, dist)),
        }
    }

    nearest.map(|(candidate, _)| candidate)
}
