//! Price-movement signals across look-back windows.

use std::cmp::Ordering;

use serde::Deserialize;

use super::coin::CoinCode;
use super::window::{round_to, Window, WindowChanges};

/// Per-window changes for one coin as computed by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRow {
    pub coin_id: i64,
    pub code: CoinCode,
    pub rank: i32,
    pub changes: WindowChanges,
}

/// A coin that moved enough to be worth an alert.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    pub coin_id: i64,
    pub code: CoinCode,
    pub rank: i32,
    pub changes: WindowChanges,
    /// Sum of all window changes, rounded to three places.
    pub percent_sum: f64,
}

impl MovementRow {
    /// Sum of the present window changes, rounded to three places.
    #[must_use]
    pub fn percent_sum(&self) -> f64 {
        let sum: f64 = self.changes.iter().filter_map(|(_, v)| v).sum();
        round_to(sum, 3)
    }
}

/// Alert thresholds, in percent.
///
/// A coin qualifies when the absolute change of any window reaches that
/// window's threshold and the summed change reaches `min_percent_sum`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    pub minute10: f64,
    pub hour: f64,
    pub hour4: f64,
    pub hour12: f64,
    pub hour24: f64,
    pub min_percent_sum: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            minute10: 2.0,
            hour: 3.0,
            hour4: 4.0,
            hour12: 8.0,
            hour24: 10.0,
            min_percent_sum: 2.0,
        }
    }
}

impl SignalThresholds {
    #[must_use]
    pub const fn for_window(&self, window: Window) -> f64 {
        match window {
            Window::Minute10 => self.minute10,
            Window::Hour => self.hour,
            Window::Hour4 => self.hour4,
            Window::Hour12 => self.hour12,
            Window::Hour24 => self.hour24,
        }
    }

    /// Whether any window moved at least its threshold, up or down.
    #[must_use]
    pub fn crosses_any(&self, changes: &WindowChanges) -> bool {
        changes
            .iter()
            .any(|(w, v)| v.is_some_and(|v| v.abs() >= self.for_window(w)))
    }

    /// Keep qualifying rows, strongest summed move first.
    #[must_use]
    pub fn select(&self, rows: Vec<MovementRow>) -> Vec<Movement> {
        let mut selected: Vec<Movement> = rows
            .into_iter()
            .filter(|row| self.crosses_any(&row.changes))
            .map(|row| {
                let percent_sum = row.percent_sum();
                Movement {
                    coin_id: row.coin_id,
                    code: row.code,
                    rank: row.rank,
                    changes: row.changes,
                    percent_sum,
                }
            })
            .filter(|m| m.percent_sum >= self.min_percent_sum)
            .collect();

        selected.sort_by(|a, b| {
            b.percent_sum
                .partial_cmp(&a.percent_sum)
                .unwrap_or(Ordering::Equal)
        });
        selected
    }

    /// Reject thresholds that could never be crossed or are not numbers.
    pub fn validate(&self) -> Result<(), String> {
        for window in Window::ALL {
            let value = self.for_window(window);
            if !value.is_finite() || value < 0.0 {
                return Err(format!("threshold for {window} must be a non-negative number"));
            }
        }
        if !self.min_percent_sum.is_finite() {
            return Err("min_percent_sum must be a number".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::window::WindowValues;

    fn row(code: &str, changes: WindowChanges) -> MovementRow {
        MovementRow {
            coin_id: 1,
            code: CoinCode::new(code),
            rank: 1,
            changes,
        }
    }

    fn changes(m10: f64, h: f64, h4: f64, h12: f64, h24: f64) -> WindowChanges {
        WindowValues {
            minute10: Some(m10),
            hour: Some(h),
            hour4: Some(h4),
            hour12: Some(h12),
            hour24: Some(h24),
        }
    }

    #[test]
    fn quiet_coin_is_dropped() {
        let thresholds = SignalThresholds::default();
        let rows = vec![row("BTC", changes(0.5, 1.0, 1.0, 2.0, 3.0))];
        assert!(thresholds.select(rows).is_empty());
    }

    #[test]
    fn ten_minute_spike_qualifies() {
        let thresholds = SignalThresholds::default();
        let rows = vec![row("ETH", changes(2.0, 0.1, 0.0, 0.0, 0.0))];
        let selected = thresholds.select(rows);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].percent_sum, 2.1);
    }

    #[test]
    fn sharp_drop_crosses_but_negative_sum_is_dropped() {
        let thresholds = SignalThresholds::default();
        let drop = changes(-2.5, -3.0, -1.0, 0.0, 0.0);
        assert!(thresholds.crosses_any(&drop));
        assert!(thresholds.select(vec![row("SOL", drop)]).is_empty());
    }

    #[test]
    fn missing_windows_count_as_zero() {
        let thresholds = SignalThresholds::default();
        let partial = WindowValues {
            hour24: Some(12.0),
            ..Default::default()
        };
        let selected = thresholds.select(vec![row("ADA", partial)]);
        assert_eq!(selected[0].percent_sum, 12.0);
    }

    #[test]
    fn sorted_by_percent_sum_descending() {
        let thresholds = SignalThresholds::default();
        let rows = vec![
            row("AAA", changes(2.0, 0.0, 0.0, 0.0, 0.0)),
            row("BBB", changes(0.0, 0.0, 0.0, 0.0, 11.0)),
            row("CCC", changes(0.0, 4.0, 0.0, 0.0, 0.0)),
        ];
        let codes: Vec<_> = thresholds
            .select(rows)
            .into_iter()
            .map(|m| m.code.to_string())
            .collect();
        assert_eq!(codes, ["BBB", "CCC", "AAA"]);
    }

    #[test]
    fn validate_rejects_negative_threshold() {
        let thresholds = SignalThresholds {
            hour: -1.0,
            ..Default::default()
        };
        assert!(thresholds.validate().is_err());
        assert!(SignalThresholds::default().validate().is_ok());
    }
}
