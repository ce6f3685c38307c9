//! The weight subsystem — per-account historical weight accounting.
//!
//! Balance changes reported by the external bookkeeper enter through the
//! transfer hook, pass the preservation gate, are redirected by the
//! delegation directory, and land as checkpoints in per-account weight logs.
//! Historical "weight at time T" queries are answered from the logs exactly.
//!
//! All mutations assume a single writer (one transaction at a time); a
//! concurrent host must wrap the engine in its own exclusion boundary.

pub mod delegation;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod preservation;
pub mod snapshot;

pub use delegation::DelegationDirectory;
pub use engine::WeightEngine;
pub use error::WeightError;
pub use events::{DelegationChange, WeightChange};
pub use ledger::WeightLedger;
pub use preservation::PreservationRegistry;
pub use snapshot::{WeightSnapshot, SNAPSHOT_VERSION};
