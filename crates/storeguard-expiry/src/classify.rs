//! Bucket predicates over refreshed certificates.
//!
//! All predicates assume the derived expiry fields were refreshed for
//! the current sweep; they never recompute from the expiry date.

use storeguard_core::records::Certificate;

/// Active, not yet expired, and expiring within `days` (inclusive).
pub fn expiring_within(cert: &Certificate, days: i64) -> bool {
    cert.is_active
        && !cert.is_expired
        && cert.days_until_expiry.is_some_and(|d| d <= days)
}

/// Active and already past its expiry date.
pub fn expired(cert: &Certificate) -> bool {
    cert.is_active && cert.is_expired
}
