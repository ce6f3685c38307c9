//! Checkpoint-specific errors.

use tally_types::Timestamp;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("checkpoint timestamp {attempted} precedes last recorded {last}")]
    TimestampRegression {
        last: Timestamp,
        attempted: Timestamp,
    },
}
