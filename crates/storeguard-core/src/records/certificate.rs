use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{EXPIRING_SOON_WINDOW_DAYS, SECONDS_PER_DAY};

/// One regulatory document for a store.
///
/// The derived triple `{days_until_expiry, is_expired, is_expiring_soon}`
/// is always a pure function of `expiry_date` and "now"; it is never
/// mutated independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,
    pub store_id: String,
    pub uploaded_by_id: String,
    pub name: String,
    /// Certificate type label (fire safety, food handling, ...).
    pub kind: String,
    pub issued_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: Option<i64>,
    pub is_expired: bool,
    pub is_expiring_soon: bool,
    /// Soft-deactivated certificates are invisible to the sweep.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Certificate {
    /// Days from `now` until expiry midnight, rounded up.
    ///
    /// A certificate expiring later today yields 0; one whose expiry date
    /// passed yesterday yields -1.
    pub fn days_until(expiry_date: NaiveDate, now: DateTime<Utc>) -> i64 {
        let expiry_midnight = expiry_date.and_time(chrono::NaiveTime::MIN).and_utc();
        let secs = (expiry_midnight - now).num_seconds() as f64;
        (secs / SECONDS_PER_DAY).ceil() as i64
    }

    /// Recompute the derived expiry fields from `expiry_date` and `now`.
    ///
    /// Returns true when any derived value changed.
    pub fn refresh_expiry_status(&mut self, now: DateTime<Utc>) -> bool {
        let days = Self::days_until(self.expiry_date, now);
        let expired = days < 0;
        let expiring_soon = (0..=EXPIRING_SOON_WINDOW_DAYS).contains(&days);

        let changed = self.days_until_expiry != Some(days)
            || self.is_expired != expired
            || self.is_expiring_soon != expiring_soon;

        self.days_until_expiry = Some(days);
        self.is_expired = expired;
        self.is_expiring_soon = expiring_soon;
        changed
    }
}

impl PartialEq for Certificate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
