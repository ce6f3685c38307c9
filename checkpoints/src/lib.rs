//! Append-only checkpoint logs.
//!
//! A checkpoint log keeps the full history of a tracked quantity as ordered
//! (timestamp, value) pairs. Historical queries binary-search the log, so
//! "value at time T" answers are exact — never approximated from a cached
//! current value.

pub mod error;
pub mod log;

pub use error::CheckpointError;
pub use log::{Checkpoint, CheckpointLog};
