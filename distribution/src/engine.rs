//! The claim engine — per-account cursors over the distribution schedule.

use std::collections::HashMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tally_types::{AccountId, AssetId, Timestamp, RATE_SCALE, SECONDS_PER_DAY};
use tally_weight::WeightEngine;
use tracing::{info, warn};

use crate::error::DistributionError;
use crate::payout::AssetPayout;
use crate::schedule::{DistributionSchedule, Period, RewardWindow};

/// One paid-out asset batch from a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFlush {
    pub asset: AssetId,
    pub account: AccountId,
    pub amount: u128,
}

/// Walks the schedule on behalf of claimants and tracks their cursors.
///
/// Claim cost is O(unclaimed periods × days per period); accounts are
/// expected to claim periodically to keep that bounded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionEngine {
    schedule: DistributionSchedule,
    cursors: HashMap<AccountId, usize>,
}

impl DistributionEngine {
    pub fn new(genesis: Timestamp) -> Self {
        Self {
            schedule: DistributionSchedule::new(genesis),
            cursors: HashMap::new(),
        }
    }

    pub fn schedule(&self) -> &DistributionSchedule {
        &self.schedule
    }

    /// The next unprocessed period index for `account`.
    pub fn cursor(&self, account: &AccountId) -> usize {
        self.cursors.get(account).copied().unwrap_or(0)
    }

    /// Append a reward period distributing `amount` of `asset` over the time
    /// elapsed since the last period, at the current aggregate weight supply.
    ///
    /// Authorization and asset custody are the caller's concern; see
    /// [`DistributionSchedule::create_period`].
    pub fn create_period(
        &mut self,
        weights: &WeightEngine,
        asset: AssetId,
        amount: u128,
        now: Timestamp,
    ) -> Result<RewardWindow, DistributionError> {
        self.schedule
            .create_period(asset, amount, weights.total_supply(), now)
    }

    /// Rewards `account` would receive from a claim right now, batched by
    /// asset in schedule order. Read-only; the cursor does not move.
    pub fn pending_rewards(
        &self,
        weights: &WeightEngine,
        account: &AccountId,
    ) -> Vec<(AssetId, u128)> {
        let mut batches = Vec::new();
        self.accrue(weights, account, |asset, amount| {
            batches.push((asset.clone(), amount));
        });
        batches
    }

    /// Claim every unprocessed period for `account`.
    ///
    /// Each asset batch goes out through `payout`. A declined payout is
    /// logged and forfeited — no rollback, no retry — and the cursor advances
    /// to the end of the schedule unconditionally, so a second claim with no
    /// new periods pays nothing.
    pub fn claim(
        &mut self,
        weights: &WeightEngine,
        payout: &mut dyn AssetPayout,
        account: &AccountId,
    ) -> Vec<ClaimFlush> {
        let mut flushes = Vec::new();
        self.accrue(weights, account, |asset, amount| {
            if payout.request_payout(asset, account, amount) {
                info!(account = %account, asset = %asset, amount, "claim paid");
                flushes.push(ClaimFlush {
                    asset: asset.clone(),
                    account: account.clone(),
                    amount,
                });
            } else {
                warn!(account = %account, asset = %asset, amount, "payout declined, amount forfeited");
            }
        });
        self.cursors.insert(account.clone(), self.schedule.len());
        flushes
    }

    /// Shared accrual walk behind `pending_rewards` and `claim`: integrate
    /// daily weight × rate from the account's cursor to the end of the
    /// schedule, batching contiguous same-asset windows, handing each
    /// non-zero batch to `flush`.
    fn accrue<F: FnMut(&AssetId, u128)>(
        &self,
        weights: &WeightEngine,
        account: &AccountId,
        mut flush: F,
    ) {
        let mut accumulated: u128 = 0;
        let mut batch_asset: Option<AssetId> = None;
        for period in self.schedule.periods_from(self.cursor(account)) {
            let window = match period {
                Period::Scheduled(w) => w,
                Period::Void => continue,
            };
            if let Some(asset) = batch_asset.as_ref() {
                if *asset != window.asset {
                    if accumulated > 0 {
                        flush(asset, accumulated);
                    }
                    accumulated = 0;
                }
            }
            batch_asset = Some(window.asset.clone());
            accumulated = accumulated.saturating_add(Self::accrue_window(weights, account, window));
        }
        if let Some(asset) = batch_asset {
            if accumulated > 0 {
                flush(&asset, accumulated);
            }
        }
    }

    /// One window's accrual: read the account's weight at each day boundary
    /// and integrate it against the window's rate.
    fn accrue_window(weights: &WeightEngine, account: &AccountId, window: &RewardWindow) -> u128 {
        let mut total: u128 = 0;
        let mut day = window.start;
        while day < window.end {
            let weight = weights.weight_at(account, day);
            if weight > 0 {
                let reward = U256::from(weight) * U256::from(window.rate_per_weight_day)
                    / U256::from(RATE_SCALE);
                // The product cannot exceed u128 when weight mirrors supply;
                // clamp instead of panicking if an upstream bug breaks that.
                let reward = if reward > U256::from(u128::MAX) {
                    u128::MAX
                } else {
                    reward.as_u128()
                };
                total = total.saturating_add(reward);
            }
            day = day.plus_secs(SECONDS_PER_DAY);
        }
        total
    }
}
