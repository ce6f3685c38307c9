//! Fixed engine parameters.

/// Fixed-point scale factor for per-weight daily rates.
///
/// A rate of `RATE_SCALE` means one raw reward unit per unit weight per day.
pub const RATE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Length of one accrual day in seconds.
///
/// Distribution periods are measured and walked in whole days of this length;
/// a period shorter than one day is degenerate.
pub const SECONDS_PER_DAY: u64 = 86_400;
