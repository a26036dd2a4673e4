// In crates/web-server/src/types.rs

use analytics::{AugmentedRow, SummaryStats};
use core_types::{Period, Ticker};
use serde::{Deserialize, Serialize};

/// Query parameters shared by the dashboard and the API (e.g. `?ticker=msft&period=6mo`).
///
/// Missing values fall back to the configured dashboard defaults.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisParams {
    pub ticker: Option<String>,
    pub period: Option<String>,
}

/// Body of `GET /api/analysis`.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub ticker: Ticker,
    pub period: Period,
    pub summary: SummaryStats,
    pub rows: Vec<AugmentedRow>,
}
