//! Weight-subsystem errors.
//!
//! Underflow and overflow are fatal: weight must mirror the token supply
//! exactly, so a range violation means a logic bug upstream, not a condition
//! to recover from.

use tally_checkpoints::CheckpointError;
use tally_types::AccountId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeightError {
    #[error("weight underflow for {account}: moving {needed}, holds {available}")]
    Underflow {
        account: AccountId,
        needed: u128,
        available: u128,
    },

    #[error("weight overflow for {account}")]
    Overflow { account: AccountId },

    #[error("total supply underflow: burning {needed}, supply {available}")]
    TotalUnderflow { needed: u128, available: u128 },

    #[error("total supply overflow")]
    TotalOverflow,

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}
