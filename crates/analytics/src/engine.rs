// In crates/analytics/src/engine.rs

use crate::types::{Analysis, DerivedSeries, SummaryStats};
use core_types::PriceSeries;
use strategies::{MACrossover, Strategy};

/// Trading days used to annualize daily figures.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// The engine responsible for deriving returns, moving averages, the crossover
/// signal and the summary statistics from a price series.
///
/// It holds configuration only; `calculate` is a pure function of its input.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    crossover: MACrossover,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            crossover: MACrossover::golden_cross(),
        }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the derived series and summary statistics for `series`.
    pub fn calculate(&self, series: &PriceSeries) -> Analysis {
        let closes = series.closes();

        // 1. Daily simple returns.
        let daily_return = daily_returns(&closes);

        // 2. Moving averages and the crossover regime.
        let crossover = self.crossover.evaluate(&closes);

        // 3. Headline numbers.
        let returns: Vec<f64> = daily_return.iter().flatten().copied().collect();
        let summary = summarize(&closes, &returns);

        tracing::debug!(
            strategy = self.crossover.name(),
            bars = closes.len(),
            returns = returns.len(),
            "Calculated derived series."
        );

        Analysis {
            derived: DerivedSeries {
                daily_return,
                ma50: crossover.fast_ma,
                ma200: crossover.slow_ma,
                signal: crossover.signal,
                position: crossover.position,
            },
            summary,
        }
    }
}

/// `close[i] / close[i - 1] - 1`, with no value for the first bar.
pub fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(closes.windows(2).map(|w| Some(w[1] / w[0] - 1.0)))
        .take(closes.len())
        .collect()
}

fn summarize(closes: &[f64], returns: &[f64]) -> SummaryStats {
    let latest_price = closes.last().copied().unwrap_or_default();

    let mean = mean(returns);
    let mean_annualized_return = mean.map(|m| m * TRADING_DAYS_PER_YEAR);

    // The exponent divides by the bar count, not the return count.
    let growth: f64 = returns.iter().map(|r| 1.0 + r).product();
    let compound_annualized_return = if closes.is_empty() {
        0.0
    } else {
        growth.powf(TRADING_DAYS_PER_YEAR / closes.len() as f64) - 1.0
    };

    let annualized_volatility = sample_std_dev(returns).map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt());

    SummaryStats {
        latest_price,
        mean_annualized_return,
        compound_annualized_return,
        annualized_volatility,
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with the `n - 1` denominator; needs two observations.
fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
