//! Thread-safe set of candidate respawn facilities.
//!
//! The host adds a facility when its backing entity becomes simulation-ready
//! and removes it when the entity is destroyed or unloaded; membership is
//! keyed by [`FacilityId`] so the registry never dereferences host objects
//! to compare them. Selection works on an explicit [`snapshot`] taken under
//! the lock, so a respawn computation never blocks facility churn on other
//! threads.
//!
//! [`snapshot`]: FacilityRegistry::snapshot

use crate::host::Facility;
use shared::FacilityId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
pub struct FacilityRegistry {
    inner: Mutex<HashMap<FacilityId, Arc<dyn Facility>>>,
}

impl FacilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<FacilityId, Arc<dyn Facility>>> {
        // Nothing panics while holding this lock; recover rather than poison.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a facility. Set semantics: re-adding an already registered
    /// facility is a no-op and keeps the original handle.
    pub fn add(&self, facility: Arc<dyn Facility>) {
        let id = facility.id();
        let mut facilities = self.lock();

        if facilities.contains_key(&id) {
            return;
        }

        facilities.insert(id, facility);
        log::debug!("registry: {id} added ({} registered)", facilities.len());
    }

    /// Removes a facility by handle; no-op when it was never registered.
    pub fn remove(&self, id: FacilityId) {
        let mut facilities = self.lock();

        if facilities.remove(&id).is_some() {
            log::debug!("registry: {id} removed ({} registered)", facilities.len());
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Point-in-time copy of the registered facilities, safe to iterate
    /// without holding the registry lock. Order is unspecified.
    pub fn snapshot(&self) -> Vec<Arc<dyn Facility>> {
        self.lock().values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Isometry3, Point3, Vector3};
    use shared::PlayerId;
    use shared::selector::{Candidate, OwnerRelation};
    use shared::spawn::AnchorTable;

    struct StubFacility(FacilityId);

    impl Facility for StubFacility {
        fn id(&self) -> FacilityId {
            self.0
        }

        fn candidate(&self, _requester: PlayerId) -> Option<Candidate> {
            Some(Candidate {
                id: self.0,
                position: Point3::origin(),
                functional: true,
                working: true,
                powered_and_enabled: true,
                relation: OwnerRelation::Owner,
                subtype_tag: String::new(),
            })
        }

        fn world_transform(&self) -> Isometry3<f64> {
            Isometry3::identity()
        }

        fn anchors(&self) -> AnchorTable {
            AnchorTable::new()
        }

        fn velocity_at(&self, _point: &Point3<f64>) -> Vector3<f64> {
            Vector3::zeros()
        }
    }

    #[test]
    fn add_is_idempotent_per_facility() {
        let registry = FacilityRegistry::new();
        registry.add(Arc::new(StubFacility(FacilityId(1))));
        registry.add(Arc::new(StubFacility(FacilityId(1))));
        registry.add(Arc::new(StubFacility(FacilityId(2))));

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_is_a_no_op_for_unknown_handles() {
        let registry = FacilityRegistry::new();
        registry.add(Arc::new(StubFacility(FacilityId(1))));

        registry.remove(FacilityId(99));
        assert_eq!(registry.len(), 1);

        registry.remove(FacilityId(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let registry = FacilityRegistry::new();
        registry.add(Arc::new(StubFacility(FacilityId(1))));

        let snapshot = registry.snapshot();
        registry.remove(FacilityId(1));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id(), FacilityId(1));
        assert!(registry.is_empty());
    }
}
