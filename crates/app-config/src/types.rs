// In crates/app-config/src/types.rs

use core_types::Period;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the market-data provider.
    pub provider: ProviderSettings,
    pub server: ServerSettings,
    /// Defaults offered by the dashboard form.
    pub dashboard: DashboardSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderSettings {
    /// The REST base URL of the chart API.
    pub base_url: String,
    /// Sent with every request; Yahoo rejects requests without one.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Use split/dividend adjusted prices.
    pub auto_adjust: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DashboardSettings {
    pub default_ticker: String,
    pub default_period: Period,
}
