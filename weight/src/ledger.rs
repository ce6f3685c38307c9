//! Per-account weight ledger backed by checkpoint logs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tally_checkpoints::{CheckpointError, CheckpointLog};
use tally_types::{AccountId, Timestamp};
use tracing::debug;

use crate::error::WeightError;
use crate::events::WeightChange;

/// One checkpoint log per account, plus a log of the aggregate supply.
///
/// Account logs record delegated weight. The total log mirrors the token
/// supply (it moves on mint and burn only), which keeps distribution-rate
/// computation O(1) in the number of holders.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeightLedger {
    genesis: Timestamp,
    accounts: HashMap<AccountId, CheckpointLog>,
    total: CheckpointLog,
}

impl WeightLedger {
    pub fn new(genesis: Timestamp) -> Self {
        Self {
            genesis,
            accounts: HashMap::new(),
            total: CheckpointLog::new(),
        }
    }

    /// The ledger's genesis timestamp (start of the first reward period).
    pub fn genesis(&self) -> Timestamp {
        self.genesis
    }

    /// The latest recorded weight for `account` (0 if never checkpointed).
    pub fn current_weight(&self, account: &AccountId) -> u128 {
        self.accounts.get(account).map_or(0, CheckpointLog::latest)
    }

    /// The weight `account` held at `timestamp`.
    pub fn weight_at(&self, account: &AccountId, timestamp: Timestamp) -> u128 {
        self.accounts
            .get(account)
            .map_or(0, |log| log.upper_lookup(timestamp))
    }

    /// The current aggregate supply.
    pub fn total_supply(&self) -> u128 {
        self.total.latest()
    }

    /// The aggregate supply at `timestamp`.
    pub fn total_supply_at(&self, timestamp: Timestamp) -> u128 {
        self.total.upper_lookup(timestamp)
    }

    /// Move `amount` of weight from `from` to `to` at time `now`.
    ///
    /// Either endpoint may be `None`: weight entering or leaving the
    /// delegated set. Both sides are validated before the first checkpoint is
    /// written, so a failed move leaves the ledger untouched, and both sides
    /// land in the same logical operation — no observer sees weight gone from
    /// one account but not yet arrived at the other.
    ///
    /// Returns one `WeightChange` per side touched; empty when `from == to`
    /// or `amount == 0`.
    pub fn move_weight(
        &mut self,
        from: Option<&AccountId>,
        to: Option<&AccountId>,
        amount: u128,
        now: Timestamp,
    ) -> Result<Vec<WeightChange>, WeightError> {
        let (from_next, to_next) = match self.plan_move(from, to, amount, now)? {
            Some(plan) => plan,
            None => return Ok(Vec::new()),
        };

        let mut changes = Vec::with_capacity(2);
        if let (Some(account), Some(next)) = (from, from_next) {
            let (previous, current) = self.log_mut(account).push(now, next)?;
            debug!(account = %account, previous, current, "weight debited");
            changes.push(WeightChange {
                account: account.clone(),
                previous,
                current,
            });
        }
        if let (Some(account), Some(next)) = (to, to_next) {
            let (previous, current) = self.log_mut(account).push(now, next)?;
            debug!(account = %account, previous, current, "weight credited");
            changes.push(WeightChange {
                account: account.clone(),
                previous,
                current,
            });
        }
        Ok(changes)
    }

    /// Validate that [`WeightLedger::move_weight`] with the same arguments
    /// would succeed, without writing anything.
    ///
    /// Lets a caller that must update other state alongside the move reject
    /// the whole operation up front.
    pub fn check_move(
        &self,
        from: Option<&AccountId>,
        to: Option<&AccountId>,
        amount: u128,
        now: Timestamp,
    ) -> Result<(), WeightError> {
        self.plan_move(from, to, amount, now).map(|_| ())
    }

    /// Both sides' next values, or `None` for a no-op move. Carries every
    /// range and ordering check `move_weight` relies on, so validation and
    /// execution can never drift apart.
    fn plan_move(
        &self,
        from: Option<&AccountId>,
        to: Option<&AccountId>,
        amount: u128,
        now: Timestamp,
    ) -> Result<Option<(Option<u128>, Option<u128>)>, WeightError> {
        if amount == 0 || from == to {
            return Ok(None);
        }

        let from_next = match from {
            Some(account) => {
                let available = self.current_weight(account);
                let next =
                    available
                        .checked_sub(amount)
                        .ok_or_else(|| WeightError::Underflow {
                            account: account.clone(),
                            needed: amount,
                            available,
                        })?;
                Some(next)
            }
            None => None,
        };
        let to_next = match to {
            Some(account) => {
                let next = self
                    .current_weight(account)
                    .checked_add(amount)
                    .ok_or_else(|| WeightError::Overflow {
                        account: account.clone(),
                    })?;
                Some(next)
            }
            None => None,
        };
        // Surface ordering violations before the first write as well.
        for account in [from, to].into_iter().flatten() {
            if let Some(last) = self.accounts.get(account).and_then(CheckpointLog::last_timestamp)
            {
                if now < last {
                    return Err(CheckpointError::TimestampRegression {
                        last,
                        attempted: now,
                    }
                    .into());
                }
            }
        }
        Ok(Some((from_next, to_next)))
    }

    /// Record newly minted supply in the total log.
    pub fn record_mint(&mut self, amount: u128, now: Timestamp) -> Result<(), WeightError> {
        if amount == 0 {
            return Ok(());
        }
        let next = self
            .total
            .latest()
            .checked_add(amount)
            .ok_or(WeightError::TotalOverflow)?;
        self.total.push(now, next)?;
        Ok(())
    }

    /// Record burned supply in the total log.
    pub fn record_burn(&mut self, amount: u128, now: Timestamp) -> Result<(), WeightError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.total.latest();
        let next = available
            .checked_sub(amount)
            .ok_or(WeightError::TotalUnderflow {
                needed: amount,
                available,
            })?;
        self.total.push(now, next)?;
        Ok(())
    }

    /// Accounts that have ever been checkpointed.
    pub fn tracked_accounts(&self) -> impl Iterator<Item = &AccountId> {
        self.accounts.keys()
    }

    fn log_mut(&mut self, account: &AccountId) -> &mut CheckpointLog {
        self.accounts.entry(account.clone()).or_default()
    }
}
