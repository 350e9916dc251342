/// Storeguard system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Score assigned when an audit has no applicable checklist items.
/// No applicable checks means nothing failed.
pub const EMPTY_AUDIT_SCORE: f64 = 100.0;

/// Number of most recent approved audits feeding a store's rolling score.
pub const ROLLING_SCORE_WINDOW: usize = 3;

/// Fixed window (days) for the `is_expiring_soon` derived flag on a
/// certificate. Independent of the sweep's configurable warning threshold.
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 30;

/// Seconds per day, used for ceiling day-diff calculations.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
