//! Background timers for notification passes and the daily report.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, NaiveDateTime, Timelike, Utc};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::app::config::ScheduleConfig;
use crate::app::Broadcaster;

const QUIET_SLEEP: Duration = Duration::from_secs(60 * 60);
const CONSOLIDATION_SLEEP: Duration = Duration::from_secs(24 * 60 * 60);

/// What the notification loop does on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTick {
    /// Inside quiet hours; sleep an hour.
    Quiet,
    /// At a notification minute not yet handled.
    Send,
    Idle,
}

/// Wall-clock schedule evaluated against UTC plus a fixed offset.
#[derive(Debug, Clone)]
pub struct Schedule {
    config: ScheduleConfig,
}

impl Schedule {
    #[must_use]
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Local wall-clock time for `now`.
    #[must_use]
    pub fn local(&self, now: DateTime<Utc>) -> NaiveDateTime {
        (now + ChronoDuration::hours(i64::from(self.config.utc_offset_hours))).naive_utc()
    }

    /// Whether `hour` falls in `[quiet_start_hour, quiet_end_hour)`.
    ///
    /// A start after the end wraps past midnight.
    #[must_use]
    pub fn is_quiet_hour(&self, hour: u32) -> bool {
        let (start, end) = (self.config.quiet_start_hour, self.config.quiet_end_hour);
        if start <= end {
            (start..end).contains(&hour)
        } else {
            hour >= start || hour < end
        }
    }

    #[must_use]
    pub fn is_notification_minute(&self, minute: u32) -> bool {
        self.config.notification_minutes.contains(&minute)
    }

    #[must_use]
    pub fn is_consolidation_hour(&self, hour: u32) -> bool {
        hour == self.config.consolidation_hour
    }

    /// Decide the notification tick. `last_sent` is the local minute of the
    /// previous pass, so a minute spanning two ticks fires once.
    #[must_use]
    pub fn notification_tick(
        &self,
        local: NaiveDateTime,
        last_sent: Option<NaiveDateTime>,
    ) -> NotificationTick {
        if self.is_quiet_hour(local.hour()) {
            return NotificationTick::Quiet;
        }
        if !self.is_notification_minute(local.minute()) {
            return NotificationTick::Idle;
        }
        let minute = truncate_to_minute(local);
        if last_sent == Some(minute) {
            NotificationTick::Idle
        } else {
            NotificationTick::Send
        }
    }

    #[must_use]
    pub fn notification_tick_period(&self) -> Duration {
        Duration::from_secs(self.config.notification_tick_secs)
    }

    #[must_use]
    pub fn consolidation_tick_period(&self) -> Duration {
        Duration::from_secs(self.config.consolidation_tick_secs)
    }
}

fn truncate_to_minute(time: NaiveDateTime) -> NaiveDateTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Run notification passes at the configured minutes, forever.
///
/// Each pass runs in its own task; the broadcaster skips a pass while
/// another one is still sending.
pub async fn notification_loop(broadcaster: Arc<Broadcaster>, schedule: Schedule) {
    info!(
        minutes = ?schedule.config.notification_minutes,
        "Notification loop started"
    );

    let mut ticker = interval(schedule.notification_tick_period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_sent = None;

    loop {
        ticker.tick().await;
        let local = schedule.local(Utc::now());

        match schedule.notification_tick(local, last_sent) {
            NotificationTick::Quiet => {
                debug!(hour = local.hour(), "Quiet hours, sleeping");
                sleep(QUIET_SLEEP).await;
            }
            NotificationTick::Send => {
                last_sent = Some(truncate_to_minute(local));
                let broadcaster = Arc::clone(&broadcaster);
                tokio::spawn(async move {
                    if let Err(e) = broadcaster.send_notifications().await {
                        warn!(error = %e, "Notification pass failed");
                    }
                });
            }
            NotificationTick::Idle => {}
        }
    }
}

/// Send the consolidation report once a day at the configured hour.
pub async fn consolidation_loop(broadcaster: Arc<Broadcaster>, schedule: Schedule) {
    info!(
        hour = schedule.config.consolidation_hour,
        "Consolidation loop started"
    );

    loop {
        let local = schedule.local(Utc::now());
        if schedule.is_consolidation_hour(local.hour()) {
            if let Err(e) = broadcaster.send_consolidation().await {
                warn!(error = %e, "Consolidation report failed");
            }
            sleep(CONSOLIDATION_SLEEP).await;
        }
        sleep(schedule.consolidation_tick_period()).await;
    }
}
