//! Fundamental types for the tally engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account and asset identifiers, timestamps, and fixed engine
//! parameters.

pub mod account;
pub mod asset;
pub mod params;
pub mod time;

pub use account::AccountId;
pub use asset::AssetId;
pub use params::{RATE_SCALE, SECONDS_PER_DAY};
pub use time::Timestamp;
