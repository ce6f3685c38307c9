//! Delegation directory — redirects weight accrual between accounts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tally_types::AccountId;

/// Maps each account to its chosen delegatee.
///
/// An account participates in weight accrual only after delegating, possibly
/// to itself; undelegated balances carry no weight. Records are overwritten
/// by re-delegation, never deleted. Delegation moves weight only — the
/// delegator's token balance is untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DelegationDirectory {
    delegatees: HashMap<AccountId, AccountId>,
}

impl DelegationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current delegatee for `account`, if any.
    pub fn delegatee_of(&self, account: &AccountId) -> Option<&AccountId> {
        self.delegatees.get(account)
    }

    /// Record `delegatee` for `delegator`, returning the previous record.
    /// `None` clears the delegation (the delegator drops out of weight
    /// accrual).
    pub fn set(
        &mut self,
        delegator: AccountId,
        delegatee: Option<AccountId>,
    ) -> Option<AccountId> {
        match delegatee {
            Some(target) => self.delegatees.insert(delegator, target),
            None => self.delegatees.remove(&delegator),
        }
    }

    /// Number of accounts with an active delegation.
    pub fn len(&self) -> usize {
        self.delegatees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegatees.is_empty()
    }
}
