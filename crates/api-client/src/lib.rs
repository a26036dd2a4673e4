// In crates/api-client/src/lib.rs

use std::time::Duration;

use app_config::types::ProviderSettings;
use async_trait::async_trait;
use core_types::{Period, PriceBar, Ticker};

pub mod chart;
pub mod error;
pub mod types;

// Re-export public types
pub use chart::parse_chart_response;
pub use error::{Error, Result};
pub use types::YahooClient;

/// The universal interface for a source of daily price history.
///
/// An empty result is not an error: it means the ticker is unknown or has no
/// bars in the requested period, and callers must stop there.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// The name of the provider (e.g., "YahooFinance").
    fn name(&self) -> &'static str;

    /// Fetches daily bars for `ticker` over `period`, oldest first.
    async fn fetch_history(&self, ticker: &Ticker, period: Period) -> Result<Vec<PriceBar>>;
}

impl YahooClient {
    /// Constructs a new YahooClient from ProviderSettings.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(YahooClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            auto_adjust: settings.auto_adjust,
        })
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooClient {
    fn name(&self) -> &'static str {
        "YahooFinance"
    }

    /// Fetches daily candles.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint.
    async fn fetch_history(&self, ticker: &Ticker, period: Period) -> Result<Vec<PriceBar>> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        tracing::info!(%ticker, %period, "Fetching price history.");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("range", period.as_str()),
                ("interval", "1d"),
                ("includeAdjustedClose", "true"),
            ])
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::RequestFailed)?;

        // Yahoo answers unknown symbols with a 404 that still carries a chart
        // error object, so the body is parsed before the status is judged.
        match parse_chart_response(&body, self.auto_adjust) {
            Ok(bars) => {
                tracing::debug!(%ticker, count = bars.len(), "Received price history.");
                Ok(bars)
            }
            Err(Error::DeserializationFailed(_)) if !status.is_success() => Err(Error::ApiError {
                code: status.as_u16().to_string(),
                msg: body.chars().take(200).collect(),
            }),
            Err(e) => Err(e),
        }
    }
}

// Free function to allow api_client::new usage
pub fn new(settings: &ProviderSettings) -> Result<YahooClient> {
    YahooClient::new(settings)
}
