use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use api_client::PriceHistoryProvider;
use app_config::types::DashboardSettings;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, NaiveDate};
use core_types::{Period, PriceBar, Ticker};
use engine::Engine;
use rust_decimal::Decimal;
use tower::ServiceExt;
use web_server::{AppState, create_router};

/// Knows a single symbol; everything else comes back empty.
struct StubProvider {
    known: &'static str,
    calls: AtomicUsize,
}

#[async_trait]
impl PriceHistoryProvider for StubProvider {
    fn name(&self) -> &'static str {
        "Stub"
    }

    async fn fetch_history(&self, ticker: &Ticker, _period: Period) -> api_client::Result<Vec<PriceBar>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if ticker.as_str() != self.known {
            return Ok(vec![]);
        }
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        Ok((0..260)
            .map(|i| {
                let close = Decimal::from(1_000 + (i * 13) % 97);
                PriceBar {
                    date: start + Duration::days(i),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1_250_000,
                }
            })
            .collect())
    }
}

fn setup() -> (axum::Router, Arc<StubProvider>) {
    let provider = Arc::new(StubProvider {
        known: "AAPL",
        calls: AtomicUsize::new(0),
    });
    let dashboard = DashboardSettings {
        default_ticker: "AAPL".to_string(),
        default_period: Period::OneYear,
    };
    let state = AppState::new(Engine::new(provider.clone()), dashboard);
    (create_router(state), provider)
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_check_responds_ok() {
    let (router, _) = setup();
    let (status, _, body) = get(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn dashboard_renders_metrics_chart_and_table() {
    let (router, provider) = setup();
    let (status, content_type, body) = get(router, "/?ticker=aapl&period=6mo").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(body.contains("AAPL Stock Analysis"));
    for label in [
        "Latest Price",
        "Annualized Mean Return",
        "Compounded Annualized Return",
        "Annualized Volatility",
    ] {
        assert!(body.contains(label), "missing metric {label}");
    }
    assert!(body.contains("<svg"));
    assert!(body.contains("View Raw Data"));
    assert!(body.contains("1,250,000"));
    assert!(body.contains("<option value=\"6mo\" selected>"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dashboard_uses_configured_defaults() {
    let (router, _) = setup();
    let (status, _, body) = get(router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("AAPL Stock Analysis"));
    assert!(body.contains("<option value=\"1y\" selected>"));
}

#[tokio::test]
async fn unknown_ticker_shows_error_panel() {
    let (router, provider) = setup();
    let (status, _, body) = get(router, "/?ticker=ZZZZ&period=1y").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Error: No such data exists or Invalid Ticker"));
    assert!(!body.contains("<svg"));
    assert!(!body.contains("View Raw Data"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn api_returns_summary_and_rows() {
    let (router, _) = setup();
    let (status, content_type, body) = get(router, "/api/analysis?ticker=AAPL&period=1y").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ticker"], "AAPL");
    assert_eq!(json["period"], "1y");
    assert_eq!(json["rows"].as_array().unwrap().len(), 260);
    assert!(json["rows"][0]["daily_return"].is_null());
    assert!(json["rows"][259]["ma200"].is_number());
    assert!(json["summary"]["latest_price"].is_number());
}

#[tokio::test]
async fn api_maps_errors_to_statuses() {
    let (router, provider) = setup();

    let (status, _, body) = get(router.clone(), "/api/analysis?ticker=AAPL&period=7d").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("7d"));

    let (status, _, body) = get(router, "/api/analysis?ticker=NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "Error: No such data exists or Invalid Ticker");

    // The bad period never reached the provider.
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn chart_endpoint_serves_svg() {
    let (router, _) = setup();
    let (status, content_type, body) = get(router, "/api/chart.svg?ticker=AAPL").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert!(body.contains("AAPL Price Chart with Moving Averages"));
}
