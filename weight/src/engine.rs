//! The weight engine — the transfer hook and its surrounding state.

use serde::{Deserialize, Serialize};
use tally_types::{AccountId, Timestamp};
use tracing::{debug, info};

use crate::delegation::DelegationDirectory;
use crate::error::WeightError;
use crate::events::{DelegationChange, WeightChange};
use crate::ledger::WeightLedger;
use crate::preservation::PreservationRegistry;

/// Coordinates the weight ledger, delegation directory, and preservation
/// registry behind the external transfer hook.
///
/// The engine never reads balances itself: the bookkeeper reports deltas
/// through [`WeightEngine::on_balance_change`] after it has applied them, and
/// supplies the delegator's balance to [`WeightEngine::delegate`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeightEngine {
    ledger: WeightLedger,
    delegations: DelegationDirectory,
    preservation: PreservationRegistry,
}

impl WeightEngine {
    pub fn new(genesis: Timestamp) -> Self {
        Self {
            ledger: WeightLedger::new(genesis),
            delegations: DelegationDirectory::new(),
            preservation: PreservationRegistry::new(),
        }
    }

    // ── Read-only queries ────────────────────────────────────────────────

    pub fn genesis(&self) -> Timestamp {
        self.ledger.genesis()
    }

    pub fn current_weight(&self, account: &AccountId) -> u128 {
        self.ledger.current_weight(account)
    }

    pub fn weight_at(&self, account: &AccountId, timestamp: Timestamp) -> u128 {
        self.ledger.weight_at(account, timestamp)
    }

    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    pub fn total_supply_at(&self, timestamp: Timestamp) -> u128 {
        self.ledger.total_supply_at(timestamp)
    }

    pub fn delegatee_of(&self, account: &AccountId) -> Option<&AccountId> {
        self.delegations.delegatee_of(account)
    }

    pub fn is_preserved(&self, owner: &AccountId, mover: &AccountId) -> bool {
        self.preservation.is_preserved(owner, mover)
    }

    pub fn ledger(&self) -> &WeightLedger {
        &self.ledger
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Transfer hook: `amount` moved from `from` to `to` (either may be
    /// `None` for mint/burn), initiated by `caller`. The bookkeeper invokes
    /// this after applying the balance delta.
    ///
    /// Mint and burn always adjust the total-supply log, since balances move
    /// regardless of preservation. The delegated weight move is skipped
    /// entirely when the sender has preserved the caller — the flag is keyed
    /// on the sender's (owner, mover) pair for both halves of the move, so a
    /// preserved transfer leaves weight with the sender's delegatee.
    ///
    /// The delegated move is validated before the total log is touched, so a
    /// move that cannot apply (preservation lets balances and weight diverge,
    /// making that reachable on burns) fails the whole operation with no
    /// state written.
    pub fn on_balance_change(
        &mut self,
        caller: &AccountId,
        from: Option<&AccountId>,
        to: Option<&AccountId>,
        amount: u128,
        now: Timestamp,
    ) -> Result<Vec<WeightChange>, WeightError> {
        let preserved = match from {
            Some(owner) => self.preservation.is_preserved(owner, caller),
            None => false,
        };
        let effective_from = from.and_then(|a| self.delegations.delegatee_of(a)).cloned();
        let effective_to = to.and_then(|a| self.delegations.delegatee_of(a)).cloned();
        if !preserved {
            self.ledger
                .check_move(effective_from.as_ref(), effective_to.as_ref(), amount, now)?;
        }

        match (from, to) {
            (None, Some(_)) => self.ledger.record_mint(amount, now)?,
            (Some(_), None) => self.ledger.record_burn(amount, now)?,
            _ => {}
        }

        if preserved {
            debug!(caller = %caller, amount, "preserved transfer, weight untouched");
            return Ok(Vec::new());
        }
        self.ledger
            .move_weight(effective_from.as_ref(), effective_to.as_ref(), amount, now)
    }

    /// Redirect `delegator`'s weight accrual to `delegatee`.
    ///
    /// `balance` is the delegator's current token balance as reported by the
    /// bookkeeper; it moves as weight from the previous delegatee (or
    /// nowhere) to the new one. Re-delegating to the same target re-fires the
    /// move, which no-ops under the same-endpoint guard.
    pub fn delegate(
        &mut self,
        delegator: &AccountId,
        delegatee: Option<AccountId>,
        balance: u128,
        now: Timestamp,
    ) -> Result<DelegationChange, WeightError> {
        let previous = self.delegations.delegatee_of(delegator).cloned();
        self.ledger
            .move_weight(previous.as_ref(), delegatee.as_ref(), balance, now)?;
        self.delegations.set(delegator.clone(), delegatee.clone());
        info!(delegator = %delegator, previous = ?previous, current = ?delegatee, "delegatee changed");
        Ok(DelegationChange {
            delegator: delegator.clone(),
            previous,
            current: delegatee,
        })
    }

    /// Flag or unflag `mover`'s transfers out of `owner`'s balance as
    /// weight-neutral. The authorization collaborator must have verified that
    /// the mutation comes from `owner`.
    pub fn set_preserved(&mut self, owner: AccountId, mover: AccountId, flag: bool) {
        self.preservation.set_preserved(owner, mover, flag);
    }
}
