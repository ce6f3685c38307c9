//! End-to-end distribution scenario: three holders, three reward periods,
//! transfers between periods, claims checked against hand-computed totals.

use std::collections::HashMap;

use tally_distribution::DistributionEngine;
use tally_nullables::{NullClock, NullPayout};
use tally_types::{AccountId, AssetId, RATE_SCALE};
use tally_weight::WeightEngine;

const UNIT: u128 = RATE_SCALE;

/// Minimal stand-in for the external balance bookkeeper: applies the balance
/// delta, then reports it through the transfer hook.
struct Bookkeeper {
    balances: HashMap<AccountId, u128>,
}

impl Bookkeeper {
    fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    fn balance(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn mint(&mut self, weights: &mut WeightEngine, issuer: &AccountId, to: &AccountId, amount: u128, clock: &NullClock) {
        *self.balances.entry(to.clone()).or_default() += amount;
        weights
            .on_balance_change(issuer, None, Some(to), amount, clock.now())
            .unwrap();
    }

    fn transfer(&mut self, weights: &mut WeightEngine, from: &AccountId, to: &AccountId, amount: u128, clock: &NullClock) {
        let held = self.balance(from);
        assert!(held >= amount, "bookkeeper underflow");
        self.balances.insert(from.clone(), held - amount);
        *self.balances.entry(to.clone()).or_default() += amount;
        weights
            .on_balance_change(from, Some(from), Some(to), amount, clock.now())
            .unwrap();
    }
}

fn within_one_percent(actual: u128, expected: u128) -> bool {
    let tolerance = expected / 100;
    actual >= expected - tolerance && actual <= expected + tolerance
}

#[test]
fn three_holders_three_periods() {
    let clock = NullClock::new(0);
    let issuer = AccountId::new("issuer");
    let a = AccountId::new("a");
    let b = AccountId::new("b");
    let c = AccountId::new("c");
    let rwd = AssetId::new("rwd");

    let mut weights = WeightEngine::new(clock.now());
    let mut dist = DistributionEngine::new(clock.now());
    let mut book = Bookkeeper::new();
    let mut payout = NullPayout::new();

    // Day 0: 100 units each, all self-delegated.
    for account in [&a, &b, &c] {
        book.mint(&mut weights, &issuer, account, 100 * UNIT, &clock);
        weights
            .delegate(account, Some(account.clone()), book.balance(account), clock.now())
            .unwrap();
    }
    assert_eq!(weights.total_supply(), 300 * UNIT);

    // Day 30: first distribution of 300, then A sends everything to B.
    clock.advance_days(30);
    dist.create_period(&weights, rwd.clone(), 300 * UNIT, clock.now())
        .unwrap();
    book.transfer(&mut weights, &a, &b, 100 * UNIT, &clock);
    assert_eq!(weights.current_weight(&a), 0);
    assert_eq!(weights.current_weight(&b), 200 * UNIT);

    // Day 60: second distribution, B sends everything to C and claims.
    clock.advance_days(30);
    dist.create_period(&weights, rwd.clone(), 300 * UNIT, clock.now())
        .unwrap();
    book.transfer(&mut weights, &b, &c, 200 * UNIT, &clock);

    // B held 100 through period 1 and 200 through period 2.
    dist.claim(&weights, &mut payout, &b);
    assert!(within_one_percent(payout.paid_total(&rwd, &b), 300 * UNIT));

    // A held 100 through period 1 only.
    dist.claim(&weights, &mut payout, &a);
    assert!(within_one_percent(payout.paid_total(&rwd, &a), 100 * UNIT));

    // Day 90: third distribution; C held 100, 100, then 300.
    clock.advance_days(30);
    dist.create_period(&weights, rwd.clone(), 300 * UNIT, clock.now())
        .unwrap();
    dist.claim(&weights, &mut payout, &c);
    assert!(within_one_percent(payout.paid_total(&rwd, &c), 500 * UNIT));

    // Final claims pick up nothing new for A and B beyond period 3 at zero
    // weight.
    dist.claim(&weights, &mut payout, &a);
    dist.claim(&weights, &mut payout, &b);
    assert!(within_one_percent(payout.paid_total(&rwd, &a), 100 * UNIT));
    assert!(within_one_percent(payout.paid_total(&rwd, &b), 300 * UNIT));

    // Token balances are untouched by claims and delegation.
    assert_eq!(book.balance(&a), 0);
    assert_eq!(book.balance(&b), 0);
    assert_eq!(book.balance(&c), 300 * UNIT);
}

#[test]
fn preservation_toggle_changes_weight_but_never_balances() {
    let clock = NullClock::new(0);
    let issuer = AccountId::new("issuer");
    let owner = AccountId::new("owner");
    let receiver = AccountId::new("receiver");

    let mut weights = WeightEngine::new(clock.now());
    let mut book = Bookkeeper::new();

    for account in [&owner, &receiver] {
        book.mint(&mut weights, &issuer, account, 100 * UNIT, &clock);
        weights
            .delegate(account, Some(account.clone()), book.balance(account), clock.now())
            .unwrap();
    }

    // First transfer with preservation on: weight-neutral.
    weights.set_preserved(owner.clone(), owner.clone(), true);
    clock.advance_days(1);
    book.transfer(&mut weights, &owner, &receiver, 10 * UNIT, &clock);
    assert_eq!(weights.current_weight(&owner), 100 * UNIT);
    assert_eq!(weights.current_weight(&receiver), 100 * UNIT);

    // Second, identical transfer with preservation off: weight moves.
    weights.set_preserved(owner.clone(), owner.clone(), false);
    clock.advance_days(1);
    book.transfer(&mut weights, &owner, &receiver, 10 * UNIT, &clock);
    assert_eq!(weights.current_weight(&owner), 90 * UNIT);
    assert_eq!(weights.current_weight(&receiver), 110 * UNIT);

    // Balances saw both transfers identically.
    assert_eq!(book.balance(&owner), 80 * UNIT);
    assert_eq!(book.balance(&receiver), 120 * UNIT);
}

#[test]
fn per_asset_decline_forfeits_only_that_asset() {
    let clock = NullClock::new(0);
    let issuer = AccountId::new("issuer");
    let a = AccountId::new("a");
    let x = AssetId::new("x");
    let y = AssetId::new("y");

    let mut weights = WeightEngine::new(clock.now());
    let mut dist = DistributionEngine::new(clock.now());
    let mut book = Bookkeeper::new();
    let mut payout = NullPayout::new();

    book.mint(&mut weights, &issuer, &a, 100 * UNIT, &clock);
    weights
        .delegate(&a, Some(a.clone()), 100 * UNIT, clock.now())
        .unwrap();

    clock.advance_days(30);
    dist.create_period(&weights, x.clone(), 300 * UNIT, clock.now())
        .unwrap();
    clock.advance_days(30);
    dist.create_period(&weights, y.clone(), 300 * UNIT, clock.now())
        .unwrap();

    // x is configured to decline; y pays normally in the same claim.
    payout.decline_asset(x.clone());
    let flushes = dist.claim(&weights, &mut payout, &a);
    assert_eq!(flushes.len(), 1);
    assert_eq!(flushes[0].asset, y);
    assert_eq!(payout.requests.len(), 2);
    assert_eq!(payout.paid_total(&x, &a), 0);
    assert!(within_one_percent(payout.paid_total(&y, &a), 300 * UNIT));
}

#[test]
fn declined_payout_is_forfeited_for_good() {
    let clock = NullClock::new(0);
    let issuer = AccountId::new("issuer");
    let a = AccountId::new("a");
    let rwd = AssetId::new("rwd");

    let mut weights = WeightEngine::new(clock.now());
    let mut dist = DistributionEngine::new(clock.now());
    let mut book = Bookkeeper::new();
    let mut payout = NullPayout::new();

    book.mint(&mut weights, &issuer, &a, 100 * UNIT, &clock);
    weights
        .delegate(&a, Some(a.clone()), 100 * UNIT, clock.now())
        .unwrap();

    clock.advance_days(30);
    dist.create_period(&weights, rwd.clone(), 300 * UNIT, clock.now())
        .unwrap();

    payout.decline_next(1);
    let flushes = dist.claim(&weights, &mut payout, &a);
    assert!(flushes.is_empty());
    assert_eq!(payout.requests.len(), 1);
    assert!(!payout.requests[0].paid);
    assert_eq!(payout.paid_total(&rwd, &a), 0);

    // The cursor advanced, so the amount stays forfeited.
    let flushes = dist.claim(&weights, &mut payout, &a);
    assert!(flushes.is_empty());
    assert_eq!(payout.paid_total(&rwd, &a), 0);
}
