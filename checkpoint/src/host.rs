//! Host collaborator interfaces.
//!
//! The embedding engine owns players, entities, physics and event dispatch;
//! this module is the complete surface we consume from it. Every trait is
//! object-safe and `Send + Sync` so the coordinator can hold `Arc<dyn ...>`
//! handles and be driven from whichever threads the host dispatches on.

use nalgebra::{Isometry3, Point3, Vector3};
use shared::selector::Candidate;
use shared::spawn::AnchorTable;
use shared::{FacilityId, PlayerId};
use std::sync::Arc;

/// Opaque string-keyed settings store the host persists with the world save.
pub trait SettingsStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` when nothing was saved.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
}

/// Resolves live players by identity.
///
/// Implementations should absorb host-side faults (a query throwing inside
/// the engine) and report them as `None`; the coordinator treats an
/// unresolvable player as a soft failure, never as a reason to unwind into
/// host dispatch.
pub trait PlayerDirectory: Send + Sync {
    fn find(&self, player: PlayerId) -> Option<Arc<dyn PlayerHandle>>;
}

/// A resolved live player.
pub trait PlayerHandle: Send + Sync {
    fn display_name(&self) -> String;
    /// Current world position of the player (or their remains).
    fn position(&self) -> Point3<f64>;
    /// The player's active controllable character, if they have one.
    fn character(&self) -> Option<Arc<dyn Character>>;
}

/// Physics-level handle for a player's character.
pub trait Character: Send + Sync {
    fn set_world_transform(&self, transform: &Isometry3<f64>);
    fn set_linear_velocity(&self, velocity: Vector3<f64>);
    /// Current speed in meters per second, after any velocity change.
    fn speed(&self) -> f64;
    fn damping_enabled(&self) -> bool;
    /// Flips the inertia damping toggle.
    fn switch_damping(&self);
}

/// A candidate respawn facility, backed by a host entity the registry does
/// not own.
pub trait Facility: Send + Sync {
    fn id(&self) -> FacilityId;

    /// Surveys the facility as seen by `requester`: position, health flags,
    /// owner relation and subtype tag in one point-in-time snapshot.
    ///
    /// Returns `None` when the backing entity is gone or is not actually a
    /// medical facility; such entries are excluded from selection rather
    /// than treated as a precondition violation.
    fn candidate(&self, requester: PlayerId) -> Option<Candidate>;

    /// The facility's current world transform.
    fn world_transform(&self) -> Isometry3<f64>;

    /// Named local-frame anchor points exposed by the facility's model.
    fn anchors(&self) -> AnchorTable;

    /// World velocity of the facility's backing body at `point`, so a
    /// teleported character inherits the motion of e.g. a moving ship.
    fn velocity_at(&self, point: &Point3<f64>) -> Vector3<f64>;
}

/// Displays a short-lived on-screen message to one player.
pub trait Notifier: Send + Sync {
    fn notify(&self, player: PlayerId, message: &str, duration_ms: u32);
}

/// Append-only session log with an explicit close at shutdown.
pub trait LogSink: Send + Sync {
    fn line(&self, message: &str);
    fn close(&self);
}

/// [`LogSink`] adapter that forwards session lines to the `log` facade, for
/// hosts without a dedicated per-mod log file.
pub struct FacadeLog;

impl LogSink for FacadeLog {
    fn line(&self, message: &str) {
        log::info!("{message}");
    }

    fn close(&self) {}
}

/// Callbacks the coordinator hangs on the host's player events.
pub struct EventHooks {
    pub on_player_died: Box<dyn Fn(PlayerId) + Send + Sync>,
    pub on_player_spawned: Box<dyn Fn(PlayerId) + Send + Sync>,
}

/// The host's player-event dispatcher.
///
/// `register` wires both hooks; `deregister` removes whatever is currently
/// wired. The coordinator calls these from its `start`/`stop` lifecycle, so
/// no hook outlives the system that owns the state behind it.
pub trait EventSource: Send + Sync {
    fn register(&self, hooks: EventHooks);
    fn deregister(&self);
}
