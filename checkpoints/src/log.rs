//! The checkpoint log — an ordered (timestamp, value) history.

use serde::{Deserialize, Serialize};
use tally_types::Timestamp;

use crate::error::CheckpointError;

/// A single (timestamp, value) record.
///
/// Values are `u128` — narrower than some balance encodings in the wild, but
/// every mutation feeding a log goes through checked arithmetic that fails
/// with an explicit overflow or underflow error, so the narrower range can
/// never truncate silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub timestamp: Timestamp,
    pub value: u128,
}

/// An append-only sequence of checkpoints with non-decreasing timestamps.
///
/// Two pushes within the same instant collapse into one checkpoint (the later
/// value wins), so a log never holds two entries for the same timestamp.
/// A push with a timestamp earlier than the last recorded one is rejected —
/// under the single-writer model that can only mean a sequencing bug upstream.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckpointLog {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointLog {
    pub fn new() -> Self {
        Self {
            checkpoints: Vec::new(),
        }
    }

    /// Record `value` at `timestamp`.
    ///
    /// Returns `(previous_latest, value)` for change notifications.
    pub fn push(
        &mut self,
        timestamp: Timestamp,
        value: u128,
    ) -> Result<(u128, u128), CheckpointError> {
        let previous = self.latest();
        if let Some(last) = self.checkpoints.last_mut() {
            if timestamp < last.timestamp {
                return Err(CheckpointError::TimestampRegression {
                    last: last.timestamp,
                    attempted: timestamp,
                });
            }
            if timestamp == last.timestamp {
                last.value = value;
                return Ok((previous, value));
            }
        }
        self.checkpoints.push(Checkpoint { timestamp, value });
        Ok((previous, value))
    }

    /// The most recently recorded value, or 0 for an empty log.
    pub fn latest(&self) -> u128 {
        self.checkpoints.last().map_or(0, |c| c.value)
    }

    /// The most recent checkpoint, if any.
    pub fn latest_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// The timestamp of the most recent checkpoint, if any.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.checkpoints.last().map(|c| c.timestamp)
    }

    /// The value at the greatest checkpoint timestamp at or before `timestamp`.
    ///
    /// Returns 0 when the log is empty or `timestamp` predates the first
    /// entry. Most queries target "now" or the recent past, so the trailing
    /// entry is checked first; anything older falls back to an exact
    /// O(log n) binary search.
    pub fn upper_lookup(&self, timestamp: Timestamp) -> u128 {
        match self.checkpoints.last() {
            None => 0,
            Some(last) if last.timestamp <= timestamp => last.value,
            Some(_) => {
                let pos = self
                    .checkpoints
                    .partition_point(|c| c.timestamp <= timestamp);
                if pos == 0 {
                    0
                } else {
                    self.checkpoints[pos - 1].value
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Iterate the raw checkpoints, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }
}
