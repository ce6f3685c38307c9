//! Nullable payout — records payout requests instead of moving assets.

use std::collections::HashSet;

use tally_distribution::AssetPayout;
use tally_types::{AccountId, AssetId};

/// One recorded payout request and its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayoutRequest {
    pub asset: AssetId,
    pub account: AccountId,
    pub amount: u128,
    pub paid: bool,
}

/// An [`AssetPayout`] that records every request and never moves real assets.
///
/// Pays by default. Individual assets can be configured to decline, and
/// [`NullPayout::decline_next`] forces the next n requests to fail regardless
/// of asset — useful for exercising the forfeit-on-failure claim policy.
#[derive(Debug, Default)]
pub struct NullPayout {
    pub requests: Vec<PayoutRequest>,
    declined_assets: HashSet<AssetId>,
    decline_next: usize,
}

impl NullPayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decline every future request for `asset`.
    pub fn decline_asset(&mut self, asset: AssetId) {
        self.declined_assets.insert(asset);
    }

    /// Decline the next `n` requests, whatever their asset.
    pub fn decline_next(&mut self, n: usize) {
        self.decline_next += n;
    }

    /// Total amount actually paid to `account` in `asset`.
    pub fn paid_total(&self, asset: &AssetId, account: &AccountId) -> u128 {
        self.requests
            .iter()
            .filter(|r| r.paid && r.asset == *asset && r.account == *account)
            .map(|r| r.amount)
            .sum()
    }
}

impl AssetPayout for NullPayout {
    fn request_payout(&mut self, asset: &AssetId, account: &AccountId, amount: u128) -> bool {
        let paid = if self.decline_next > 0 {
            self.decline_next -= 1;
            false
        } else {
            !self.declined_assets.contains(asset)
        };
        self.requests.push(PayoutRequest {
            asset: asset.clone(),
            account: account.clone(),
            amount,
            paid,
        });
        paid
    }
}
