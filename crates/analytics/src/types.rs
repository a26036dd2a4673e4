// In crates/analytics/src/types.rs

use chrono::NaiveDate;
use core_types::PriceSeries;
use rust_decimal::Decimal;
use serde::Serialize;
use strategies::Marker;

/// Per-bar derived fields, index-aligned with the `PriceSeries` they came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DerivedSeries {
    /// `close[i] / close[i - 1] - 1`; `None` for the first bar.
    pub daily_return: Vec<Option<f64>>,
    /// 50 day simple moving average; `None` for the first 49 bars.
    pub ma50: Vec<Option<f64>>,
    /// 200 day simple moving average; `None` for the first 199 bars.
    pub ma200: Vec<Option<f64>>,
    /// 1 while MA50 is above MA200, else 0.
    pub signal: Vec<u8>,
    /// Change in `signal` from the previous bar; `None` for the first bar.
    pub position: Vec<Option<i8>>,
}

impl DerivedSeries {
    pub fn len(&self) -> usize {
        self.daily_return.len()
    }

    pub fn is_empty(&self) -> bool {
        self.daily_return.is_empty()
    }

    /// Buy/sell events, in bar order.
    pub fn markers(&self) -> impl Iterator<Item = (usize, Marker)> + '_ {
        self.position
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| Marker::from_position(p).map(|m| (i, m)))
    }
}

/// The headline numbers for one price series.
///
/// A `None` means the statistic is undefined for the series (too few returns)
/// and should be displayed as "N/A".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub latest_price: f64,
    pub mean_annualized_return: Option<f64>,
    pub compound_annualized_return: f64,
    pub annualized_volatility: Option<f64>,
}

/// Everything the calculator derives from a single series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub derived: DerivedSeries,
    pub summary: SummaryStats,
}

/// One line of the raw-data table: the bar's own fields plus the derived ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentedRow {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
    pub daily_return: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub signal: u8,
    pub position: Option<i8>,
}

impl AugmentedRow {
    /// Joins a series with its derived fields, row by row.
    pub fn build_all(series: &PriceSeries, derived: &DerivedSeries) -> Vec<AugmentedRow> {
        series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| AugmentedRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                daily_return: derived.daily_return.get(i).copied().flatten(),
                ma50: derived.ma50.get(i).copied().flatten(),
                ma200: derived.ma200.get(i).copied().flatten(),
                signal: derived.signal.get(i).copied().unwrap_or_default(),
                position: derived.position.get(i).copied().flatten(),
            })
            .collect()
    }
}
