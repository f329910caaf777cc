//! Price charts rendered with plotters.
//!
//! Draws a Bollinger band behind the close-price line with a dashed moving
//! average on top, then encodes the bitmap as PNG for upload.

use chrono::{DateTime, Duration, Utc};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::*;
use serde::Deserialize;

use crate::domain::{bollinger, min_max, sma, ChartInterval, CoinCode, PricePoint};
use crate::error::{Error, Result};
use crate::port::outbound::ChartRenderer;

const PRICE_COLOR: RGBColor = RGBColor(0x00, 0x74, 0xd9);
const BAND_COLOR: RGBColor = RGBColor(0xef, 0xef, 0xef);

/// Chart dimensions and indicator periods.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    /// Samples per moving-average and band window.
    pub period: usize,
    /// Band half-width in standard deviations.
    pub band_k: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 400,
            period: 10,
            band_k: 2.0,
        }
    }
}

/// [`ChartRenderer`] backed by the plotters bitmap backend.
#[derive(Debug, Clone, Default)]
pub struct PlottersChart {
    style: ChartStyle,
}

impl PlottersChart {
    #[must_use]
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }
}

impl ChartRenderer for PlottersChart {
    fn render(
        &self,
        code: &CoinCode,
        interval: ChartInterval,
        points: &[PricePoint],
    ) -> Result<Vec<u8>> {
        if points.is_empty() {
            return Err(Error::Chart("no price points to draw".into()));
        }

        let (width, height) = (self.style.width, self.style.height);
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        draw(&mut pixels, &self.style, code, interval, points)?;
        encode_png(&pixels, width, height)
    }
}

fn chart_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Chart(err.to_string())
}

fn draw(
    pixels: &mut [u8],
    style: &ChartStyle,
    code: &CoinCode,
    interval: ChartInterval,
    points: &[PricePoint],
) -> Result<()> {
    let root = BitMapBackend::with_buffer(pixels, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let closes: Vec<f64> = points.iter().map(|p| p.close).collect();
    let (lo, hi) = padded_range(&closes)?;
    let (start, end) = time_range(points);

    let title = format!("{code} {interval}");
    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(80)
        .build_cartesian_2d(start..end, lo..hi)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .y_labels(8)
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%H:%M").to_string())
        .draw()
        .map_err(chart_err)?;

    let band: Vec<(DateTime<Utc>, f64, f64)> = points
        .iter()
        .zip(bollinger(&closes, style.period, style.band_k))
        .filter_map(|(p, b)| b.map(|(l, u)| (p.open_time, l.clamp(lo, hi), u.clamp(lo, hi))))
        .collect();

    if band.len() >= 2 {
        let outline: Vec<(DateTime<Utc>, f64)> = band
            .iter()
            .map(|(t, _, u)| (*t, *u))
            .chain(band.iter().rev().map(|(t, l, _)| (*t, *l)))
            .collect();

        chart
            .draw_series(std::iter::once(Polygon::new(outline, BAND_COLOR.filled())))
            .map_err(chart_err)?
            .label(format!("{code} - Bol. Bands"))
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BAND_COLOR.filled()));
    }

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.open_time, p.close)),
            PRICE_COLOR.stroke_width(2),
        ))
        .map_err(chart_err)?
        .label(title.clone())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PRICE_COLOR.stroke_width(2)));

    let average: Vec<(DateTime<Utc>, f64)> = points
        .iter()
        .zip(sma(&closes, style.period))
        .filter_map(|(p, v)| v.map(|v| (p.open_time, v.clamp(lo, hi))))
        .collect();

    // Every other segment is drawn to get a dashed line.
    chart
        .draw_series(
            average
                .windows(2)
                .step_by(2)
                .map(|pair| PathElement::new(vec![pair[0], pair[1]], &RED)),
        )
        .map_err(chart_err)?
        .label(format!("{code} - SMA"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 8, y)], &RED));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Y-axis bounds from the closes, widened when the price is flat.
fn padded_range(closes: &[f64]) -> Result<(f64, f64)> {
    let (lo, hi) = min_max(closes).ok_or_else(|| Error::Chart("no finite prices".into()))?;
    if hi - lo > f64::EPSILON {
        return Ok((lo, hi));
    }
    let pad = hi.abs().max(1.0) * 0.001;
    Ok((lo - pad, hi + pad))
}

/// X-axis bounds, at least one minute wide.
fn time_range(points: &[PricePoint]) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = points.first().map_or_else(Utc::now, |p| p.open_time);
    let end = points.last().map_or(start, |p| p.open_time);
    if end > start {
        (start, end)
    } else {
        (start, start + Duration::minutes(1))
    }
}

fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(chart_err)?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn series(count: usize, close: impl Fn(usize) -> f64) -> Vec<PricePoint> {
        let start = Utc::now() - Duration::hours(4);
        (0..count)
            .map(|i| PricePoint {
                open_time: start + Duration::minutes(i as i64),
                close: close(i),
            })
            .collect()
    }

    /// Width and height from the IHDR chunk.
    fn png_size(png: &[u8]) -> (u32, u32) {
        let word = |at: usize| u32::from_be_bytes([png[at], png[at + 1], png[at + 2], png[at + 3]]);
        (word(16), word(20))
    }

    #[test]
    fn renders_band_price_and_average() {
        let chart = PlottersChart::default();
        let points = series(240, |i| 60_000.0 + (i as f64 / 12.0).sin() * 500.0);

        let png = chart
            .render(&CoinCode::btc(), ChartInterval::FourHours, &points)
            .unwrap();

        assert_eq!(png[..8], PNG_SIGNATURE);
        assert_eq!(png_size(&png), (1024, 400));
        assert!(png.len() > 10_000, "png is only {} bytes", png.len());
    }

    #[test]
    fn short_flat_series_renders_without_band() {
        let style = ChartStyle {
            width: 320,
            height: 200,
            ..ChartStyle::default()
        };
        let chart = PlottersChart::new(style.clone());
        let points = series(style.period, |_| 1.0);

        let png = chart
            .render(&CoinCode::new("usdc"), ChartInterval::TenMinutes, &points)
            .unwrap();

        assert_eq!(png[..8], PNG_SIGNATURE);
        assert_eq!(png_size(&png), (320, 200));
    }

    #[test]
    fn empty_history_is_rejected() {
        let chart = PlottersChart::default();
        let result = chart.render(&CoinCode::btc(), ChartInterval::default(), &[]);
        assert!(matches!(result, Err(Error::Chart(_))));
    }

    #[test]
    fn encode_png_writes_signature() {
        let png = encode_png(&[255u8; 2 * 2 * 3], 2, 2).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
    }

    #[test]
    fn flat_prices_get_a_non_empty_range() {
        let (lo, hi) = padded_range(&[5.0, 5.0]).unwrap();
        assert!(lo < 5.0 && hi > 5.0);
    }

    #[test]
    fn single_point_spans_a_minute() {
        let point = PricePoint {
            open_time: Utc::now(),
            close: 1.0,
        };
        let (start, end) = time_range(&[point]);
        assert_eq!(end - start, Duration::minutes(1));
    }
}
