//! Preservation registry — per-(owner, mover) weight-neutrality flags.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tally_types::AccountId;

/// Flags keyed by (owner, mover), default unset.
///
/// When set, transfers the mover initiates out of the owner's balance do not
/// move weight; token balances are unaffected. Flags have no expiry and
/// persist until explicitly cleared. Only the owner may mutate its own flags
/// — the external authorization collaborator enforces that before calling in.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PreservationRegistry {
    preserved: HashMap<AccountId, HashSet<AccountId>>,
}

impl PreservationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the flag for (`owner`, `mover`).
    pub fn set_preserved(&mut self, owner: AccountId, mover: AccountId, flag: bool) {
        if flag {
            self.preserved.entry(owner).or_default().insert(mover);
        } else if let Some(movers) = self.preserved.get_mut(&owner) {
            movers.remove(&mover);
            if movers.is_empty() {
                self.preserved.remove(&owner);
            }
        }
    }

    /// Whether transfers by `mover` on `owner`'s balance are weight-neutral.
    pub fn is_preserved(&self, owner: &AccountId, mover: &AccountId) -> bool {
        self.preserved
            .get(owner)
            .is_some_and(|movers| movers.contains(mover))
    }
}
