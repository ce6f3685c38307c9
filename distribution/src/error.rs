//! Distribution errors.
//!
//! `DegeneratePeriod` is recoverable — the caller should retry once a full
//! day has elapsed and weight exists. A declined payout is not an error at
//! all: the claim engine logs it, forfeits the flush, and advances the
//! cursor anyway.

use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DistributionError {
    #[error("degenerate period: {elapsed_secs}s elapsed, total weight {total_weight}")]
    DegeneratePeriod {
        elapsed_secs: u64,
        total_weight: u128,
    },

    #[error("per-weight rate exceeds the representable range")]
    RateOverflow,
}
