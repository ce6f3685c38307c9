//! Change notifications emitted by weight mutations.

use serde::{Deserialize, Serialize};
use tally_types::AccountId;

/// One side of a weight move: `account` went from `previous` to `current`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightChange {
    pub account: AccountId,
    pub previous: u128,
    pub current: u128,
}

/// A delegatee change for one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationChange {
    pub delegator: AccountId,
    pub previous: Option<AccountId>,
    pub current: Option<AccountId>,
}
