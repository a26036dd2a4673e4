// In crates/charting/src/price_chart.rs

//! Price chart with moving averages and crossover markers.

use analytics::DerivedSeries;
use core_types::{PriceSeries, Ticker};
use plotters::prelude::*;
use strategies::Marker;

use crate::error::Result;

const FIGURE_BG: RGBColor = RGBColor(0x21, 0x21, 0x21);
const PLOT_BG: RGBColor = RGBColor(0x15, 0x18, 0x1c);
const GRID: RGBColor = RGBColor(0x2a, 0x2e, 0x33);
const CLOSE_COLOR: RGBColor = RGBColor(128, 128, 128);
const MA50_COLOR: RGBColor = RGBColor(128, 0, 128);
const MA200_COLOR: RGBColor = RGBColor(173, 216, 230);
const BUY_COLOR: RGBColor = RGBColor(0, 128, 0);
const SELL_COLOR: RGBColor = RGBColor(255, 0, 0);
const MARKER_SIZE: i32 = 5;

/// Output size of the rendered chart, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
        }
    }
}

/// Renders close price, MA50, MA200 and buy/sell markers as an SVG document.
///
/// Undefined moving-average points are left out of their lines. Markers sit
/// on the MA50 line: green up-triangles for buys, red down-triangles for sells.
pub fn render_price_chart(
    ticker: &Ticker,
    series: &PriceSeries,
    derived: &DerivedSeries,
    options: &ChartOptions,
) -> Result<String> {
    let mut svg = String::new();
    draw(&mut svg, ticker, series, derived, options)?;
    tracing::debug!(%ticker, bytes = svg.len(), "Rendered price chart.");
    Ok(svg)
}

fn draw(
    svg: &mut String,
    ticker: &Ticker,
    series: &PriceSeries,
    derived: &DerivedSeries,
    options: &ChartOptions,
) -> Result<()> {
    let root = SVGBackend::with_string(svg, (options.width, options.height)).into_drawing_area();
    root.fill(&FIGURE_BG)?;

    let closes = series.closes();
    let dates = series.dates();
    let (y_min, y_max) = price_range(&closes, derived);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{ticker} Price Chart with Moving Averages"),
            ("sans-serif", 22).into_font().color(&WHITE),
        )
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(0usize..closes.len(), y_min..y_max)?;

    chart.plotting_area().fill(&PLOT_BG)?;

    let date_label = |i: &usize| dates.get(*i).map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
    chart
        .configure_mesh()
        .bold_line_style(GRID.mix(0.4))
        .light_line_style(TRANSPARENT)
        .axis_style(WHITE)
        .label_style(("sans-serif", 12).into_font().color(&WHITE))
        .axis_desc_style(("sans-serif", 14).into_font().color(&WHITE))
        .x_desc("Date")
        .y_desc("Price ($)")
        .x_labels(8)
        .x_label_formatter(&date_label)
        .y_label_formatter(&|y| format!("{y:.2}"))
        .draw()?;

    // --- Lines ---
    chart
        .draw_series(LineSeries::new(
            closes.iter().enumerate().map(|(i, c)| (i, *c)),
            &CLOSE_COLOR,
        ))?
        .label("Close Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CLOSE_COLOR));

    chart
        .draw_series(LineSeries::new(defined_points(&derived.ma50), MA50_COLOR.mix(0.9)))?
        .label("50 day MA")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MA50_COLOR));

    chart
        .draw_series(LineSeries::new(defined_points(&derived.ma200), MA200_COLOR.mix(0.9)))?
        .label("200 day MA")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MA200_COLOR));

    // --- Markers ---
    chart
        .draw_series(
            on_ma50(derived, Marker::Buy).map(|point| TriangleMarker::new(point, MARKER_SIZE, BUY_COLOR.filled())),
        )?
        .label("Buy Signal")
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), MARKER_SIZE, BUY_COLOR.filled()));

    chart
        .draw_series(on_ma50(derived, Marker::Sell).map(|point| EmptyElement::at(point) + down_triangle()))?
        .label("Sell Signal")
        .legend(|(x, y)| EmptyElement::at((x + 10, y)) + down_triangle());

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(PLOT_BG.mix(0.9))
        .border_style(WHITE)
        .label_font(("sans-serif", 12).into_font().color(&WHITE))
        .draw()?;

    root.present()?;
    Ok(())
}

/// A filled triangle pointing down, in pixel offsets around its anchor.
fn down_triangle() -> Polygon<(i32, i32)> {
    Polygon::new(
        vec![(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, -MARKER_SIZE), (0, MARKER_SIZE)],
        SELL_COLOR.filled(),
    )
}

/// Chart positions of one kind of marker, placed on the MA50 line.
fn on_ma50(derived: &DerivedSeries, wanted: Marker) -> impl Iterator<Item = (usize, f64)> + '_ {
    derived
        .markers()
        .filter(move |(_, m)| *m == wanted)
        .filter_map(move |(i, _)| derived.ma50.get(i).copied().flatten().map(|y| (i, y)))
}

fn defined_points(values: &[Option<f64>]) -> impl Iterator<Item = (usize, f64)> + '_ {
    values.iter().enumerate().filter_map(|(i, v)| v.map(|v| (i, v)))
}

/// Y axis bounds covering prices and averages, padded so flat series still render.
fn price_range(closes: &[f64], derived: &DerivedSeries) -> (f64, f64) {
    let values = closes
        .iter()
        .copied()
        .chain(derived.ma50.iter().flatten().copied())
        .chain(derived.ma200.iter().flatten().copied());

    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { lo.abs().max(1.0) * 0.05 };
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_series_gets_a_non_empty_range() {
        let derived = DerivedSeries::default();
        let (lo, hi) = price_range(&[50.0, 50.0], &derived);
        assert!(lo < 50.0 && hi > 50.0);
    }

    #[test]
    fn range_includes_moving_averages() {
        let derived = DerivedSeries {
            ma50: vec![None, Some(120.0)],
            ..DerivedSeries::default()
        };
        let (lo, hi) = price_range(&[100.0, 110.0], &derived);
        assert!(lo < 100.0);
        assert!(hi > 120.0);
    }
}
