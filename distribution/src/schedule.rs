//! The distribution schedule — an ordered, append-only list of reward periods.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tally_types::{AssetId, Timestamp, RATE_SCALE, SECONDS_PER_DAY};
use tracing::info;

use crate::error::DistributionError;

/// A reward window bound to an asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardWindow {
    pub asset: AssetId,
    pub start: Timestamp,
    /// Exclusive end of the window.
    pub end: Timestamp,
    /// Reward per unit weight per day, scaled by `RATE_SCALE`.
    pub rate_per_weight_day: u128,
}

impl RewardWindow {
    /// Whole days covered by this window (truncating).
    pub fn days(&self) -> u64 {
        self.start.elapsed_since(self.end) / SECONDS_PER_DAY
    }
}

/// A schedule entry. `Void` entries occupy an index but pay nothing; the
/// claim walk skips them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Scheduled(RewardWindow),
    Void,
}

/// Ordered, append-only sequence of reward periods.
///
/// Scheduled windows chain exactly: each starts where the previous ended,
/// and the first starts at the ledger genesis. Indices are immutable once
/// written — claim cursors point into this sequence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DistributionSchedule {
    genesis: Timestamp,
    periods: Vec<Period>,
}

impl DistributionSchedule {
    pub fn new(genesis: Timestamp) -> Self {
        Self {
            genesis,
            periods: Vec::new(),
        }
    }

    pub fn genesis(&self) -> Timestamp {
        self.genesis
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    /// Iterate periods starting at `index`, oldest first.
    pub fn periods_from(&self, index: usize) -> impl Iterator<Item = &Period> {
        self.periods.iter().skip(index)
    }

    /// Start of the next window: the end of the last scheduled one, or the
    /// genesis when nothing has been scheduled yet.
    pub fn next_start(&self) -> Timestamp {
        self.periods
            .iter()
            .rev()
            .find_map(|p| match p {
                Period::Scheduled(w) => Some(w.end),
                Period::Void => None,
            })
            .unwrap_or(self.genesis)
    }

    /// Append a reward window distributing `amount` of `asset` over the time
    /// elapsed since the previous window ended.
    ///
    /// `total_weight` is the aggregate weight supply at creation, which keeps
    /// this O(1) in the number of holders. The caller is responsible for
    /// having `amount` of `asset` in custody. At least one full day must have
    /// elapsed and `total_weight` must be positive, otherwise the period is
    /// degenerate and nothing is appended.
    pub fn create_period(
        &mut self,
        asset: AssetId,
        amount: u128,
        total_weight: u128,
        now: Timestamp,
    ) -> Result<RewardWindow, DistributionError> {
        let start = self.next_start();
        let elapsed_secs = start.elapsed_since(now);
        let days = elapsed_secs / SECONDS_PER_DAY;
        if days == 0 || total_weight == 0 {
            return Err(DistributionError::DegeneratePeriod {
                elapsed_secs,
                total_weight,
            });
        }

        let numerator = U256::from(amount) * U256::from(RATE_SCALE);
        let denominator = U256::from(total_weight) * U256::from(days);
        let rate = numerator / denominator;
        if rate > U256::from(u128::MAX) {
            return Err(DistributionError::RateOverflow);
        }
        let window = RewardWindow {
            asset,
            start,
            end: now,
            rate_per_weight_day: rate.as_u128(),
        };
        info!(
            asset = %window.asset,
            amount,
            days,
            rate = window.rate_per_weight_day,
            "distribution period created"
        );
        self.periods.push(Period::Scheduled(window.clone()));
        Ok(window)
    }

    /// Append a void entry. It occupies an index and pays nothing.
    pub fn push_void(&mut self) {
        self.periods.push(Period::Void);
    }
}
