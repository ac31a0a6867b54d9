//! Respawn transform resolution.
//!
//! A facility model may expose a named anchor point (a "dummy") marking where
//! a respawned character should appear. When present, the resolved spawn
//! transform is that anchor's local translation composed into the facility's
//! world transform, so the character appears at the anchor with the
//! facility's orientation. When absent, we synthesize a point just outside
//! the facility footprint instead of spawning inside its geometry.
//!
//! Everything here is pure: the inputs are a world transform and an anchor
//! table copied out of the host model, and no host state is touched.

use nalgebra::{Isometry3, Point3, Translation3, Vector3};
use std::collections::HashMap;

/// Anchor name checked first.
pub const PRIMARY_SPAWN_ANCHOR: &str = "dummy detector_respawn";
/// Alias some facility models use for the same anchor.
pub const SECONDARY_SPAWN_ANCHOR: &str = "detector_respawn";

/// Named local-frame anchor translations exposed by a facility model.
pub type AnchorTable = HashMap<String, Vector3<f64>>;

/// How the spawn transform was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnSource {
    /// A named respawn anchor was found in the model.
    Anchor,
    /// No anchor; offset from the facility's own transform.
    FacilityOffset,
}

/// A resolved world-space spawn transform plus its provenance, so callers can
/// log when a facility model is missing its anchor.
#[derive(Clone, Debug)]
pub struct ResolvedSpawn {
    pub transform: Isometry3<f64>,
    pub source: SpawnSource,
}

impl ResolvedSpawn {
    /// World position the character will be placed at.
    #[inline]
    pub fn position(&self) -> Point3<f64> {
        Point3::from(self.transform.translation.vector)
    }
}

/// Resolves the world-space respawn transform for a facility.
///
/// Tries [`PRIMARY_SPAWN_ANCHOR`], then [`SECONDARY_SPAWN_ANCHOR`]. A found
/// anchor contributes only its translation; the facility's orientation is
/// preserved. Without an anchor the transform is the facility's own,
/// translated by the world-frame sum of its local forward (-Z), down (-Y)
/// and right (+X) unit directions: one unit out, below, and beside the
/// facility origin.
pub fn respawn_transform(world: &Isometry3<f64>, anchors: &AnchorTable) -> ResolvedSpawn {
    let anchor = anchors
        .get(PRIMARY_SPAWN_ANCHOR)
        .or_else(|| anchors.get(SECONDARY_SPAWN_ANCHOR));

    if let Some(local) = anchor {
        return ResolvedSpawn {
            transform: world * Translation3::from(*local),
            source: SpawnSource::Anchor,
        };
    }

    // forward + down + right in the facility's local frame, expressed in
    // world space.
    let offset = world.rotation * Vector3::new(1.0, -1.0, -1.0);

    let mut transform = *world;
    transform.translation.vector += offset;

    ResolvedSpawn {
        transform,
        source: SpawnSource::FacilityOffset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::UnitQuaternion;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1.0e-9;

    fn assert_close(actual: Point3<f64>, expected: Point3<f64>) {
        assert!(
            (actual - expected).norm() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn primary_anchor_translation_is_composed_into_world_transform() {
        let world = Isometry3::translation(100.0, 50.0, -20.0);
        let mut anchors = AnchorTable::new();
        anchors.insert(
            PRIMARY_SPAWN_ANCHOR.to_string(),
            Vector3::new(0.0, 2.0, 0.0),
        );

        let resolved = respawn_transform(&world, &anchors);
        assert_eq!(resolved.source, SpawnSource::Anchor);
        assert_close(resolved.position(), Point3::new(100.0, 52.0, -20.0));
    }

    #[test]
    fn secondary_anchor_is_used_when_primary_is_missing() {
        let world = Isometry3::translation(1.0, 2.0, 3.0);
        let mut anchors = AnchorTable::new();
        anchors.insert(
            SECONDARY_SPAWN_ANCHOR.to_string(),
            Vector3::new(1.0, 0.0, 0.0),
        );

        let resolved = respawn_transform(&world, &anchors);
        assert_eq!(resolved.source, SpawnSource::Anchor);
        assert_close(resolved.position(), Point3::new(2.0, 2.0, 3.0));
    }

    #[test]
    fn primary_anchor_wins_over_secondary() {
        let world = Isometry3::identity();
        let mut anchors = AnchorTable::new();
        anchors.insert(
            PRIMARY_SPAWN_ANCHOR.to_string(),
            Vector3::new(0.0, 5.0, 0.0),
        );
        anchors.insert(
            SECONDARY_SPAWN_ANCHOR.to_string(),
            Vector3::new(0.0, -5.0, 0.0),
        );

        let resolved = respawn_transform(&world, &anchors);
        assert_close(resolved.position(), Point3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn anchor_translation_respects_facility_rotation() {
        // Facility yawed 90 degrees around +Y: local +X maps to world -Z.
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let world = Isometry3::from_parts(Translation3::new(10.0, 0.0, 0.0), rotation);

        let mut anchors = AnchorTable::new();
        anchors.insert(
            PRIMARY_SPAWN_ANCHOR.to_string(),
            Vector3::new(2.0, 0.0, 0.0),
        );

        let resolved = respawn_transform(&world, &anchors);
        assert_close(resolved.position(), Point3::new(10.0, 0.0, -2.0));
        // Orientation is the facility's, not the anchor's.
        assert!((resolved.transform.rotation.angle_to(&rotation)).abs() < EPS);
    }

    #[test]
    fn missing_anchors_fall_back_to_facility_offset() {
        let world = Isometry3::translation(5.0, 5.0, 5.0);

        let resolved = respawn_transform(&world, &AnchorTable::new());
        assert_eq!(resolved.source, SpawnSource::FacilityOffset);
        // Identity orientation: forward -Z, down -Y, right +X.
        assert_close(resolved.position(), Point3::new(6.0, 4.0, 4.0));
    }

    #[test]
    fn fallback_offset_rotates_with_the_facility() {
        // Yawed 90 degrees around +Y: local (1, -1, -1) maps to (-1, -1, -1).
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        let world = Isometry3::from_parts(Translation3::new(0.0, 0.0, 0.0), rotation);

        let resolved = respawn_transform(&world, &AnchorTable::new());
        assert_eq!(resolved.source, SpawnSource::FacilityOffset);
        assert_close(resolved.position(), Point3::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn unrelated_anchor_names_are_ignored() {
        let world = Isometry3::identity();
        let mut anchors = AnchorTable::new();
        anchors.insert("detector_door".to_string(), Vector3::new(9.0, 9.0, 9.0));

        let resolved = respawn_transform(&world, &anchors);
        assert_eq!(resolved.source, SpawnSource::FacilityOffset);
    }
}
