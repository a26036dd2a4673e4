// In crates/web-server/src/lib.rs

use app_config::types::{DashboardSettings, ServerSettings};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use charting::{render_price_chart, ChartOptions};
use dashboard::{DashboardView, Outcome};
use engine::{AnalysisReport, AnalysisRequest, Engine};
use tokio::net::TcpListener;
use types::{AnalysisParams, AnalysisResponse};

pub mod dashboard;
pub mod error;
pub mod format;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all handlers.
///
/// Everything in here is immutable; the engine holds its provider behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub dashboard: DashboardSettings,
    pub chart: ChartOptions,
}

impl AppState {
    pub fn new(engine: Engine, dashboard: DashboardSettings) -> Self {
        Self {
            engine,
            dashboard,
            chart: ChartOptions::default(),
        }
    }

    /// Fills missing query parameters from the dashboard defaults and validates them.
    fn resolve(&self, params: &AnalysisParams) -> engine::Result<AnalysisRequest> {
        let ticker = params.ticker.as_deref().unwrap_or(self.dashboard.default_ticker.as_str());
        match params.period.as_deref() {
            Some(period) => AnalysisRequest::parse(ticker, period),
            None => AnalysisRequest::parse(ticker, self.dashboard.default_period.as_str()),
        }
    }

    async fn analyze(&self, params: &AnalysisParams) -> Result<AnalysisReport> {
        let request = self.resolve(params)?;
        Ok(self.engine.run(&request).await?)
    }

    fn render_chart(&self, report: &AnalysisReport) -> Result<String> {
        Ok(render_price_chart(&report.ticker, &report.series, &report.derived, &self.chart)?)
    }
}

/// Creates the main application router with all routes and middleware.
pub fn create_router(app_state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api_router = Router::new()
        .route("/analysis", get(analysis_handler))
        .route("/chart.svg", get(chart_handler));

    Router::new()
        .route("/", get(dashboard_handler))
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// The handler for `GET /`.
/// Renders the full dashboard, or the error panel when the request cannot be served.
async fn dashboard_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
) -> impl IntoResponse {
    let ticker_input = params.ticker.as_deref().unwrap_or(state.dashboard.default_ticker.as_str());

    let outcome = match state.analyze(&params).await {
        Ok(report) => state.render_chart(&report).map(|svg| (report, svg)),
        Err(e) => Err(e),
    };

    match outcome {
        Ok((report, chart_svg)) => {
            let page = dashboard::render_page(&DashboardView {
                ticker_input,
                period: report.period,
                outcome: Outcome::Report {
                    report: &report,
                    chart_svg: &chart_svg,
                },
            });
            (StatusCode::OK, Html(page))
        }
        Err(e) => {
            let period = params
                .period
                .as_deref()
                .and_then(|p| p.parse().ok())
                .unwrap_or(state.dashboard.default_period);
            let message = e.user_message();
            tracing::info!(ticker = ticker_input, %period, error = %e, "Dashboard request failed.");
            let page = dashboard::render_page(&DashboardView {
                ticker_input,
                period,
                outcome: Outcome::Error(&message),
            });
            (e.status_code(), Html(page))
        }
    }
}

/// The handler for `GET /api/analysis`.
async fn analysis_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
) -> Result<Json<AnalysisResponse>> {
    let report = state.analyze(&params).await?;
    let rows = report.rows();

    Ok(Json(AnalysisResponse {
        ticker: report.ticker,
        period: report.period,
        summary: report.summary,
        rows,
    }))
}

/// The handler for `GET /api/chart.svg`.
async fn chart_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
) -> Result<impl IntoResponse> {
    let report = state.analyze(&params).await?;
    let svg = state.render_chart(&report)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// The main entry point for running the web server.
///
/// Binds the configured address and serves until the process is terminated.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;
    tracing::info!("Dashboard listening on http://{}", address);

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::Serve)?;

    Ok(())
}
