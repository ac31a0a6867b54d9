//! Opaque identity handles for the two kinds of actors this system tracks.
//!
//! Both handles wrap scalar ids minted by the host engine. The registry and
//! ledger key on these handles instead of holding host object references, so
//! equality is identity equality and nothing here keeps a host entity alive.

use std::fmt;

/// Identity of a player account, stable across death/respawn within a session.
///
/// The host hands this out as a signed 64-bit scalar; we never interpret the
/// value beyond equality, hashing, and the persisted text encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle for a registered respawn facility.
///
/// Wraps the host's entity id. Two handles are the same facility exactly when
/// the scalars match; the handle stays valid-for-comparison even after the
/// backing entity is unloaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacilityId(pub u64);

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "facility:{}", self.0)
    }
}
