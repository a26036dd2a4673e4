// In app/src/main.rs

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use app_config::Settings;
use clap::{Parser, Subcommand};
use engine::{AnalysisRequest, Engine};
use tracing_subscriber::prelude::*;
use web_server::AppState;

mod report;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Daily price analysis for a single stock ticker.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetches a ticker's history and prints its summary statistics.
    Analyze {
        /// The stock ticker (e.g., "AAPL"). Defaults to the configured dashboard ticker.
        #[arg(short, long)]
        ticker: Option<String>,

        /// Lookback period: 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd or max.
        #[arg(short, long)]
        period: Option<String>,

        /// Also print the augmented raw-data table.
        #[arg(long)]
        raw: bool,

        /// Write the price chart to this SVG file.
        #[arg(long)]
        chart: Option<PathBuf>,

        /// Emit the full report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Runs the dashboard web server.
    Serve,
}

/// Presentation flags of the `analyze` subcommand.
#[derive(Debug, Default)]
struct AnalyzeOptions {
    raw: bool,
    chart: Option<PathBuf>,
    json: bool,
}

/// How an `analyze` run ended.
#[derive(Debug, PartialEq, Eq)]
enum AnalyzeOutcome {
    Reported,
    NoData,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings")?;
    init_tracing(&settings);
    tracing::debug!(environment = %settings.app.environment, "Settings loaded.");

    match cli.command {
        Commands::Analyze {
            ticker,
            period,
            raw,
            chart,
            json,
        } => {
            let options = AnalyzeOptions { raw, chart, json };
            match handle_analyze(&settings, ticker, period, options).await? {
                AnalyzeOutcome::Reported => Ok(ExitCode::SUCCESS),
                AnalyzeOutcome::NoData => Ok(ExitCode::FAILURE),
            }
        }
        Commands::Serve => {
            handle_serve(settings).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Installs the fmt layer on stderr, keeping stdout for reports.
fn init_tracing(settings: &Settings) {
    let default_level = settings
        .app
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("hyper", tracing::Level::WARN)
                .with_target("hyper_util", tracing::Level::WARN)
                .with_target("reqwest", tracing::Level::WARN)
                .with_default(default_level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn build_engine(settings: &Settings) -> Result<Engine> {
    let client = api_client::new(&settings.provider).context("Failed to build the price history client")?;
    Ok(Engine::new(Arc::new(client)))
}

// --- "Analyze" Subcommand Logic ---

async fn handle_analyze(
    settings: &Settings,
    ticker: Option<String>,
    period: Option<String>,
    options: AnalyzeOptions,
) -> Result<AnalyzeOutcome> {
    // --- 1. Resolve the request ---
    let ticker = ticker.unwrap_or_else(|| settings.dashboard.default_ticker.clone());
    let period = period.unwrap_or_else(|| settings.dashboard.default_period.to_string());
    let request = AnalysisRequest::parse(&ticker, &period)?;

    let engine = build_engine(settings)?;
    run_analysis(&engine, &request, &options).await
}

async fn run_analysis(engine: &Engine, request: &AnalysisRequest, options: &AnalyzeOptions) -> Result<AnalyzeOutcome> {
    // --- 2. Run the pipeline ---
    let report = match engine.run(request).await {
        Ok(report) => report,
        Err(engine::Error::NoData { .. }) => {
            eprintln!("{}", web_server::error::NO_DATA_MESSAGE);
            return Ok(AnalyzeOutcome::NoData);
        }
        Err(e) => return Err(e.into()),
    };

    // --- 3. Present ---
    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_summary(&report);
        if options.raw {
            report::print_raw_table(&report);
        }
    }

    if let Some(path) = &options.chart {
        let chart_options = charting::ChartOptions::default();
        let svg = charting::render_price_chart(&report.ticker, &report.series, &report.derived, &chart_options)?;
        std::fs::write(path, svg).with_context(|| format!("Failed to write chart to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Chart written.");
    }

    Ok(AnalyzeOutcome::Reported)
}

// --- "Serve" Subcommand Logic ---

async fn handle_serve(settings: Settings) -> Result<()> {
    let engine = build_engine(&settings)?;
    tracing::info!(provider = engine.provider_name(), "Starting stock analyzer dashboard.");

    let state = AppState::new(engine, settings.dashboard);
    web_server::run(settings.server, state).await?;

    Ok(())
}
