//! Medbay checkpoint system.
//!
//! Tracks where each player last died and, on respawn, relocates them to the
//! nearest usable medical facility relative to that death location. The host
//! engine owns entities, physics and event dispatch; it embeds this crate by
//! implementing the [`host`] collaborator traits, feeding facility lifecycle
//! into the [`registry`], and driving [`CheckpointSystem::start`] /
//! [`CheckpointSystem::stop`] around the session.
//!
//! The pure pieces (identity handles, eligibility filtering, nearest
//! selection, spawn transform resolution) live in the `shared` crate.

pub mod config;
pub mod coordinator;
pub mod host;
pub mod ledger;
pub mod registry;

pub use config::Config;
pub use coordinator::CheckpointSystem;
pub use ledger::DeathLocationLedger;
pub use registry::FacilityRegistry;
