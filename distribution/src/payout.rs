//! The asset-payout collaborator interface.

use tally_types::{AccountId, AssetId};

/// Sends claimed rewards to their recipient.
///
/// Asset custody and transfer execution live outside the engine; this trait
/// is the only surface the claim path touches. Implementations signal failure
/// by returning `false` — they must not panic — and the claim engine treats a
/// declined payout as forfeited: no notification, cursor advances regardless.
pub trait AssetPayout {
    fn request_payout(&mut self, asset: &AssetId, account: &AccountId, amount: u128) -> bool;
}
