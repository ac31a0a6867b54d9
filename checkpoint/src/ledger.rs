//! Per-player last-known-position ledger.
//!
//! Maps a player to the position they last died at, or, once a respawn has
//! been carried out, to the destination they were placed at, so a player who
//! dies again before anything else happens still has a sane reference point.
//! Entries are overwritten, never deleted; the whole map persists for the
//! session and across save/load through a flat text encoding.
//!
//! # Encoding
//! One record per player, `playerId,x,y,z;` with coordinates fixed to one
//! decimal place. Record order follows map iteration order; round-trips are
//! lossless at that precision and explicitly lossy beyond it.

use nalgebra::Point3;
use shared::PlayerId;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct DeathLocationLedger {
    inner: Mutex<HashMap<PlayerId, Point3<f64>>>,
}

impl Default for DeathLocationLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl DeathLocationLedger {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PlayerId, Point3<f64>>> {
        // Nothing panics while holding this lock; recover rather than poison.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records where `player` died, replacing any previous entry.
    pub fn record_death(&self, player: PlayerId, position: Point3<f64>) {
        self.lock().insert(player, position);
    }

    /// Records the destination a respawn actually placed `player` at. Same
    /// overwrite semantics as [`record_death`](Self::record_death).
    pub fn record_respawn_destination(&self, player: PlayerId, position: Point3<f64>) {
        self.lock().insert(player, position);
    }

    /// Last recorded position for `player`, if any.
    pub fn last_location(&self, player: PlayerId) -> Option<Point3<f64>> {
        self.lock().get(&player).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Encodes every record as `playerId,x,y,z;` at 1-decimal precision.
    pub fn serialize(&self) -> String {
        let records = self.lock();

        let mut out = String::with_capacity(records.len() * 32);
        for (player, position) in records.iter() {
            // Infallible for String targets.
            let _ = write!(
                out,
                "{},{:.1},{:.1},{:.1};",
                player.0, position.x, position.y, position.z
            );
        }

        out
    }

    /// Parses a previously serialized string into the ledger.
    ///
    /// Empty input is a no-op. Records with the wrong field count or an
    /// unparsable number are skipped with a warning; a duplicate player id
    /// means the last valid record wins. Returns the number of records
    /// loaded.
    pub fn deserialize(&self, text: &str) -> usize {
        let mut records = self.lock();
        let mut loaded = 0;

        for record in text.split(';').filter(|r| !r.is_empty()) {
            let Some((player, position)) = parse_record(record) else {
                log::warn!("ledger: skipping malformed record {record:?}");
                continue;
            };

            records.insert(player, position);
            loaded += 1;
        }

        loaded
    }
}

fn parse_record(record: &str) -> Option<(PlayerId, Point3<f64>)> {
    let mut fields = record.split(',');

    let player = PlayerId(fields.next()?.parse().ok()?);
    let x: f64 = fields.next()?.parse().ok()?;
    let y: f64 = fields.next()?.parse().ok()?;
    let z: f64 = fields.next()?.parse().ok()?;

    if fields.next().is_some() {
        return None;
    }

    Some((player, Point3::new(x, y, z)))
}
