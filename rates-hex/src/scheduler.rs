//! Daily rate sync.
//!
//! Fires once per day at a configured UTC wall-clock time and submits a
//! two-day backfill (yesterday and today), so a run that crosses midnight
//! still covers both dates.

use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};

use crate::backfill::BackfillService;

/// Background loop that triggers the daily sync.
pub struct DailyScheduler {
    backfill: BackfillService,
    fire_at: NaiveTime,
}

impl DailyScheduler {
    pub fn new(backfill: BackfillService, fire_at: NaiveTime) -> Self {
        Self { backfill, fire_at }
    }

    /// Spawns the scheduler loop onto the runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        loop {
            let wait = until_next_fire(Utc::now(), self.fire_at);
            tracing::info!(
                fire_at = %self.fire_at,
                wait_secs = wait.as_secs(),
                "daily sync scheduled"
            );
            tokio::time::sleep(wait).await;

            let today = Utc::now().date_naive();
            let yesterday = today.pred_opt().unwrap_or(today);
            match self.backfill.backfill(yesterday, today).await {
                Ok(group) => {
                    tracing::info!(%group, %yesterday, %today, "daily sync submitted");
                }
                // Submission failure must not kill the loop; tomorrow retries.
                Err(e) => {
                    tracing::error!(error = %e, "daily sync submission failed");
                }
            }
        }
    }
}

/// Time until the next occurrence of `fire_at` strictly after `now`.
fn until_next_fire(now: DateTime<Utc>, fire_at: NaiveTime) -> std::time::Duration {
    let today_fire = now.date_naive().and_time(fire_at).and_utc();
    let next = if today_fire > now {
        today_fire
    } else {
        today_fire + ChronoDuration::days(1)
    };

    (next - now).to_std().unwrap_or_default()
}
