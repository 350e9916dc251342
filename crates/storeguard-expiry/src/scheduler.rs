use std::sync::Arc;

use chrono::{Duration, NaiveTime};
use tracing::{info, warn};

use storeguard_core::models::SweepReport;
use storeguard_core::traits::Clock;

use crate::sweep::ExpirySweep;

/// Daily trigger for the expiry sweep.
///
/// The sweep is a singleton, non-overlapping task: a tick that arrives
/// while a sweep is still in flight is skipped, never run concurrently.
pub struct SweepScheduler {
    sweep: Arc<ExpirySweep>,
    clock: Arc<dyn Clock>,
    running: tokio::sync::Mutex<()>,
}

impl SweepScheduler {
    pub fn new(sweep: Arc<ExpirySweep>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sweep,
            clock,
            running: tokio::sync::Mutex::new(()),
        }
    }

    /// Run one sweep unless another is already in flight.
    ///
    /// Returns None when the tick was skipped.
    pub fn tick(&self) -> Option<SweepReport> {
        match self.running.try_lock() {
            Ok(_guard) => Some(self.sweep.run()),
            Err(_) => {
                warn!("expiry sweep still in flight, skipping tick");
                None
            }
        }
    }

    /// Fire the sweep once per day at `sweep_hour` local to the injected
    /// clock. Runs until the owning task is dropped or aborted.
    pub async fn run_daily(&self, sweep_hour: u32) {
        let fire_time = NaiveTime::from_hms_opt(sweep_hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
        loop {
            let now = self.clock.now();
            let today_fire = now.date_naive().and_time(fire_time).and_utc();
            let next_fire = if today_fire > now {
                today_fire
            } else {
                today_fire + Duration::days(1)
            };

            let wait = (next_fire - now).to_std().unwrap_or_default();
            info!(next_fire = %next_fire, "expiry sweep scheduled");
            tokio::time::sleep(wait).await;

            self.tick();
        }
    }
}
