// In crates/engine/src/lib.rs

pub mod error;

use std::sync::Arc;

use analytics::{AnalyticsEngine, AugmentedRow, DerivedSeries, SummaryStats};
use api_client::PriceHistoryProvider;
use core_types::{Period, PriceSeries, Ticker};
use serde::Serialize;

pub use error::{Error, Result};

/// A single (ticker, period) question from a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub ticker: Ticker,
    pub period: Period,
}

impl AnalysisRequest {
    pub fn new(ticker: Ticker, period: Period) -> Self {
        Self { ticker, period }
    }

    /// Normalizes raw user input (e.g. " aapl ", "1Y").
    pub fn parse(ticker: &str, period: &str) -> Result<Self> {
        let ticker = Ticker::parse(ticker).map_err(Error::InvalidRequest)?;
        let period = period.parse().map_err(Error::InvalidRequest)?;
        Ok(Self { ticker, period })
    }
}

/// Everything a presentation surface needs for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub ticker: Ticker,
    pub period: Period,
    pub series: PriceSeries,
    pub derived: DerivedSeries,
    pub summary: SummaryStats,
}

impl AnalysisReport {
    /// The raw-data table: bar fields joined with derived fields.
    pub fn rows(&self) -> Vec<AugmentedRow> {
        AugmentedRow::build_all(&self.series, &self.derived)
    }
}

/// The request pipeline: fetch, short-circuit on no data, calculate.
///
/// Holds no per-request state, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct Engine {
    provider: Arc<dyn PriceHistoryProvider>,
    analytics: AnalyticsEngine,
}

impl Engine {
    pub fn new(provider: Arc<dyn PriceHistoryProvider>) -> Self {
        Self {
            provider,
            analytics: AnalyticsEngine::new(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Runs one request end to end.
    pub async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        let AnalysisRequest { ticker, period } = request;

        // --- 1. Fetch ---
        let bars = self.provider.fetch_history(ticker, *period).await?;

        // --- 2. Short-circuit on an unknown ticker or an empty period ---
        if bars.is_empty() {
            tracing::warn!(%ticker, %period, provider = self.provider.name(), "No price data returned.");
            return Err(Error::NoData {
                ticker: ticker.clone(),
                period: *period,
            });
        }

        // --- 3. Validate and calculate ---
        let series = PriceSeries::new(bars).map_err(Error::InvalidSeries)?;
        let analysis = self.analytics.calculate(&series);

        tracing::info!(
            %ticker,
            %period,
            bars = series.len(),
            signals = analysis.derived.markers().count(),
            "Analysis complete."
        );

        Ok(AnalysisReport {
            ticker: ticker.clone(),
            period: *period,
            series,
            derived: analysis.derived,
            summary: analysis.summary,
        })
    }
}
