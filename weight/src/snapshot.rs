//! Weight-state snapshots — persist and restore the full weight subsystem.
//!
//! A snapshot captures every per-account checkpoint log, the total-supply
//! log, the delegation directory, and the preservation flags, so a host can
//! persist weight state and restore it without replaying transfer history.

use serde::{Deserialize, Serialize};

use crate::engine::WeightEngine;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized image of a [`WeightEngine`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeightSnapshot {
    /// Snapshot format version for compatibility.
    pub version: u32,
    engine: WeightEngine,
}

impl WeightSnapshot {
    /// Capture the current state of `engine`.
    pub fn capture(engine: &WeightEngine) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            engine: engine.clone(),
        }
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("snapshot serialization should not fail")
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        bincode::deserialize(bytes).map_err(|e| e.to_string())
    }

    /// Consume the snapshot and return the restored engine.
    pub fn restore(self) -> WeightEngine {
        self.engine
    }
}
