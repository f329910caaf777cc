//! Price history for charts.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Look-back span of a price chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartInterval {
    TenMinutes,
    OneHour,
    #[default]
    FourHours,
}

impl ChartInterval {
    /// How far back the chart reaches from now.
    #[must_use]
    pub fn lookback(self) -> Duration {
        match self {
            Self::TenMinutes => Duration::minutes(10),
            Self::OneHour => Duration::hours(1),
            Self::FourHours => Duration::hours(4),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TenMinutes => "10m",
            Self::OneHour => "1H",
            Self::FourHours => "4H",
        }
    }
}

impl fmt::Display for ChartInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One kline reduced to what a chart needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub open_time: DateTime<Utc>,
    pub close: f64,
}

/// Lowest and highest value, or `None` for an empty slice.
#[must_use]
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied().filter(|v| v.is_finite());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}
