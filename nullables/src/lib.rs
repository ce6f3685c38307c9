//! Nullable collaborators — real interfaces with the external effect
//! switched off, for deterministic tests.

pub mod clock;
pub mod payout;

pub use clock::NullClock;
pub use payout::{NullPayout, PayoutRequest};
