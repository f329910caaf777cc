//! Timer settings for the notification and consolidation loops.

use serde::Deserialize;

fn default_notification_minutes() -> Vec<u32> {
    vec![0, 30]
}

const fn default_notification_tick_secs() -> u64 {
    45
}

const fn default_quiet_start_hour() -> u32 {
    2
}

const fn default_quiet_end_hour() -> u32 {
    7
}

const fn default_consolidation_hour() -> u32 {
    10
}

const fn default_consolidation_tick_secs() -> u64 {
    30
}

/// When the background loops wake up and act.
///
/// Hours and minutes are wall-clock values in UTC shifted by
/// `utc_offset_hours`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Minutes past the hour at which a notification pass runs.
    #[serde(default = "default_notification_minutes")]
    pub notification_minutes: Vec<u32>,
    #[serde(default = "default_notification_tick_secs")]
    pub notification_tick_secs: u64,
    /// First hour of the quiet period (inclusive).
    #[serde(default = "default_quiet_start_hour")]
    pub quiet_start_hour: u32,
    /// End of the quiet period (exclusive).
    #[serde(default = "default_quiet_end_hour")]
    pub quiet_end_hour: u32,
    #[serde(default = "default_consolidation_hour")]
    pub consolidation_hour: u32,
    #[serde(default = "default_consolidation_tick_secs")]
    pub consolidation_tick_secs: u64,
    #[serde(default)]
    pub utc_offset_hours: i32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            notification_minutes: default_notification_minutes(),
            notification_tick_secs: default_notification_tick_secs(),
            quiet_start_hour: default_quiet_start_hour(),
            quiet_end_hour: default_quiet_end_hour(),
            consolidation_hour: default_consolidation_hour(),
            consolidation_tick_secs: default_consolidation_tick_secs(),
            utc_offset_hours: 0,
        }
    }
}
