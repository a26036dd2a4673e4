// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;

/// Client for the Yahoo Finance chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    /// The persistent HTTP client (carries the user agent and timeout).
    pub http_client: Client,
    /// The base URL, e.g. `https://query1.finance.yahoo.com`.
    pub base_url: String,
    /// Rescale OHLC by the adjusted close so splits and dividends do not show up as returns.
    pub auto_adjust: bool,
}

/// Top level of a `/v8/finance/chart/{symbol}` response.
#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub chart: ChartBody,
}

#[derive(Debug, Deserialize)]
pub struct ChartBody {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

/// Error object Yahoo returns in place of a result (e.g. code "Not Found").
#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Bar open times in epoch seconds. Absent when the range holds no bars.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    /// Exchange offset from UTC in seconds; used to recover the local trading date.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default)]
    pub adjclose: Vec<AdjClose>,
}

/// Column-oriented OHLCV arrays. Individual entries are null on halted days.
#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}
