pub mod ident;
pub mod selector;
pub mod spawn;

pub use ident::{FacilityId, PlayerId};
pub use selector::{Candidate, OwnerRelation, is_eligible, select_nearest};
pub use spawn::{
    AnchorTable, PRIMARY_SPAWN_ANCHOR, ResolvedSpawn, SECONDARY_SPAWN_ANCHOR, SpawnSource,
    respawn_transform,
};
