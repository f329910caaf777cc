//! Rolling indicators drawn over price charts.

/// Simple moving average; `None` until `period` values have been seen.
#[must_use]
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= period {
            sum -= values[i - period];
        }
        out.push((i + 1 >= period).then(|| sum / period as f64));
    }
    out
}

/// Bollinger band bounds `(lower, upper)` at `k` standard deviations.
#[must_use]
pub fn bollinger(values: &[f64], period: usize, k: f64) -> Vec<Option<(f64, f64)>> {
    sma(values, period)
        .into_iter()
        .enumerate()
        .map(|(i, mean)| {
            let mean = mean?;
            let window = &values[i + 1 - period..=i];
            let variance =
                window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
            let spread = k * variance.sqrt();
            Some((mean - spread, mean + spread))
        })
        .collect()
}
