/// Default warning threshold (days) for expiring certificates.
pub const DEFAULT_EXPIRY_WARNING_DAYS: i64 = 30;

/// Default critical threshold (days) for expiring certificates.
pub const DEFAULT_EXPIRY_CRITICAL_DAYS: i64 = 7;

/// Default local hour (0-23) at which the daily expiry sweep fires.
pub const DEFAULT_SWEEP_HOUR: u32 = 7;
