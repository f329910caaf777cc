//! Look-back windows and per-window percent changes.

use std::fmt;

/// Time window a percent change is measured over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Window {
    Minute10,
    Hour,
    Hour4,
    Hour12,
    Hour24,
}

impl Window {
    /// All windows, shortest first.
    pub const ALL: [Window; 5] = [
        Window::Minute10,
        Window::Hour,
        Window::Hour4,
        Window::Hour12,
        Window::Hour24,
    ];

    /// Short column label used in alert tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minute10 => "10m",
            Self::Hour => "1h",
            Self::Hour4 => "4h",
            Self::Hour12 => "12h",
            Self::Hour24 => "24h",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percent change from `open` to `close`.
///
/// Returns `None` when either side is missing or `open` is zero, so a coin
/// without candles in a window never produces a signal for it.
#[must_use]
pub fn calc_percent(open: Option<f64>, close: Option<f64>) -> Option<f64> {
    let (open, close) = (open?, close?);
    if open == 0.0 || !open.is_finite() || !close.is_finite() {
        return None;
    }
    Some((close - open) / open * 100.0)
}

/// Round to `places` decimal places, half away from zero.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// One optional value per [`Window`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowValues<T> {
    pub minute10: Option<T>,
    pub hour: Option<T>,
    pub hour4: Option<T>,
    pub hour12: Option<T>,
    pub hour24: Option<T>,
}

impl<T: Copy> WindowValues<T> {
    #[must_use]
    pub fn get(&self, window: Window) -> Option<T> {
        match window {
            Window::Minute10 => self.minute10,
            Window::Hour => self.hour,
            Window::Hour4 => self.hour4,
            Window::Hour12 => self.hour12,
            Window::Hour24 => self.hour24,
        }
    }

    /// Values paired with their window, shortest window first.
    pub fn iter(&self) -> impl Iterator<Item = (Window, Option<T>)> + '_ {
        Window::ALL.into_iter().map(|w| (w, self.get(w)))
    }

    /// Build from a function evaluated for every window.
    pub fn from_fn(mut f: impl FnMut(Window) -> Option<T>) -> Self {
        Self {
            minute10: f(Window::Minute10),
            hour: f(Window::Hour),
            hour4: f(Window::Hour4),
            hour12: f(Window::Hour12),
            hour24: f(Window::Hour24),
        }
    }
}

/// Percent change per window.
pub type WindowChanges = WindowValues<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_percent_rise_and_fall() {
        assert_eq!(calc_percent(Some(100.0), Some(105.0)), Some(5.0));
        assert_eq!(calc_percent(Some(200.0), Some(150.0)), Some(-25.0));
    }

    #[test]
    fn calc_percent_missing_or_zero_open() {
        assert_eq!(calc_percent(None, Some(1.0)), None);
        assert_eq!(calc_percent(Some(1.0), None), None);
        assert_eq!(calc_percent(Some(0.0), Some(1.0)), None);
    }

    #[test]
    fn round_to_three_places() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(-1.23449, 3), -1.234);
    }

    #[test]
    fn window_values_iterate_in_order() {
        let values = WindowValues::from_fn(|w| Some(w.label().len()));
        let labels: Vec<_> = values.iter().map(|(w, _)| w.label()).collect();
        assert_eq!(labels, ["10m", "1h", "4h", "12h", "24h"]);
        assert_eq!(values.get(Window::Hour12), Some(3));
    }
}
