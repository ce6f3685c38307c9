//! Reward distribution — time-boxed periods and per-account claims.
//!
//! A privileged host appends reward periods to an ordered schedule; each
//! period binds an asset, a [start, end) window, and a fixed-point per-weight
//! daily rate. Holders claim by integrating their historical weight day by
//! day over every period since their cursor, batched by asset and paid out
//! through the external [`AssetPayout`] collaborator.

pub mod engine;
pub mod error;
pub mod payout;
pub mod schedule;

pub use engine::{ClaimFlush, DistributionEngine};
pub use error::DistributionError;
pub use payout::AssetPayout;
pub use schedule::{DistributionSchedule, Period, RewardWindow};
