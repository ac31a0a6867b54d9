//! Event orchestration: death tracking and respawn relocation.
//!
//! [`CheckpointSystem`] is the one service object a session constructs. All
//! collaborators are injected at construction, event hooks are wired by an
//! explicit [`start`](CheckpointSystem::start) and removed by
//! [`stop`](CheckpointSystem::stop), and every failure inside a handler is
//! soft: log a line, abandon the event, never unwind into host dispatch.

use crate::config::Config;
use crate::host::{EventHooks, EventSource, LogSink, Notifier, PlayerDirectory, SettingsStore};
use crate::ledger::DeathLocationLedger;
use crate::registry::FacilityRegistry;
use nalgebra::Point3;
use shared::PlayerId;
use shared::selector::select_nearest;
use shared::spawn::{SpawnSource, respawn_transform};
use std::sync::Arc;

pub struct CheckpointSystem {
    config: Config,
    ledger: DeathLocationLedger,
    registry: Arc<FacilityRegistry>,
    players: Arc<dyn PlayerDirectory>,
    store: Arc<dyn SettingsStore>,
    notifier: Arc<dyn Notifier>,
    session_log: Arc<dyn LogSink>,
}

impl CheckpointSystem {
    pub fn new(
        config: Config,
        registry: Arc<FacilityRegistry>,
        players: Arc<dyn PlayerDirectory>,
        store: Arc<dyn SettingsStore>,
        notifier: Arc<dyn Notifier>,
        session_log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            config,
            ledger: DeathLocationLedger::new(),
            registry,
            players,
            store,
            notifier,
            session_log,
        }
    }

    /// The facility registry the host's entity lifecycle feeds.
    pub fn registry(&self) -> &Arc<FacilityRegistry> {
        &self.registry
    }

    /// The death-location ledger (read access for embedders and tests).
    pub fn ledger(&self) -> &DeathLocationLedger {
        &self.ledger
    }

    /// Loads persisted state and wires the death/spawn hooks. Associated
    /// function because the hooks need their own strong handles to `system`.
    pub fn start(system: &Arc<Self>, events: &dyn EventSource) {
        system.restore();

        let on_died = {
            let system = Arc::clone(system);
            Box::new(move |player| system.on_player_died(player))
        };
        let on_spawned = {
            let system = Arc::clone(system);
            Box::new(move |player| system.on_player_spawned(player))
        };

        events.register(EventHooks {
            on_player_died: on_died,
            on_player_spawned: on_spawned,
        });

        system.session_log.line("initialized");
    }

    /// Persists the ledger, unhooks from the event source and closes the
    /// session log.
    pub fn stop(&self, events: &dyn EventSource) {
        self.persist();
        events.deregister();

        self.session_log.line("unloaded");
        self.session_log.close();
    }

    /// Death hook: remember where the player died.
    pub fn on_player_died(&self, player_id: PlayerId) {
        let Some(player) = self.players.find(player_id) else {
            self.session_log
                .line(&format!("player died: player {player_id} not found"));
            return;
        };

        let position = player.position();
        self.ledger.record_death(player_id, position);

        self.session_log.line(&format!(
            "player died: '{}' died at {}",
            player.display_name(),
            fmt_position(&position)
        ));
    }

    /// Spawn hook: relocate the player to the nearest usable facility
    /// relative to where they last died. Any missing link leaves the host's
    /// default spawn behavior in place.
    pub fn on_player_spawned(&self, player_id: PlayerId) {
        let Some(player) = self.players.find(player_id) else {
            self.session_log
                .line(&format!("player spawned: player {player_id} not found"));
            return;
        };
        let name = player.display_name();

        let Some(character) = player.character() else {
            self.session_log
                .line(&format!("player spawned: '{name}' has no character"));
            return;
        };

        let Some(died_at) = self.ledger.last_location(player_id) else {
            self.session_log
                .line(&format!("player spawned: '{name}' has no death location"));
            return;
        };

        // Select against a point-in-time survey; facility churn on other
        // threads proceeds while we compute.
        let snapshot = self.registry.snapshot();
        let mut candidates = Vec::with_capacity(snapshot.len());
        for facility in &snapshot {
            match facility.candidate(player_id) {
                Some(candidate) => candidates.push(candidate),
                None => log::debug!("{} no longer surveyable, skipped", facility.id()),
            }
        }

        let Some(best) =
            select_nearest(&died_at, &candidates, &self.config.denied_subtypes)
        else {
            self.session_log
                .line(&format!("player spawned: '{name}' has no usable facility"));
            return;
        };

        // The snapshot outlives selection, so the winning handle is present.
        let Some(facility) = snapshot.iter().find(|f| f.id() == best.id) else {
            return;
        };

        let resolved = respawn_transform(&facility.world_transform(), &facility.anchors());
        if resolved.source == SpawnSource::FacilityOffset {
            self.session_log
                .line(&format!("{}: no respawn anchor, using facility offset", best.id));
        }

        let destination = resolved.position();
        self.ledger.record_respawn_destination(player_id, destination);

        // Inherit the facility's motion before placing the character, then
        // leave damping on exactly when the character ends up moving.
        character.set_linear_velocity(facility.velocity_at(&destination));
        character.set_world_transform(&resolved.transform);

        let wants_damping = character.speed() > 0.0;
        if character.damping_enabled() != wants_damping {
            character.switch_damping();
        }

        self.notifier.notify(
            player_id,
            &self.config.notification_text,
            self.config.notification_duration_ms,
        );
        self.session_log.line(&format!(
            "player spawned: '{name}' relocated to {} at {}",
            best.id,
            fmt_position(&destination)
        ));

        self.persist();
    }

    /// Writes the ledger to the host settings store.
    pub fn persist(&self) {
        self.store
            .set(&self.config.storage_key, &self.ledger.serialize());
        self.session_log.line("player data saved");
    }

    fn restore(&self) {
        match self.store.get(&self.config.storage_key) {
            Some(text) => {
                let loaded = self.ledger.deserialize(&text);
                self.session_log
                    .line(&format!("player data loaded ({loaded} records)"));
            }
            None => self.session_log.line("no saved player data found"),
        }
    }
}

fn fmt_position(position: &Point3<f64>) -> String {
    format!("({:.1}, {:.1}, {:.1})", position.x, position.y, position.z)
}
