// In crates/app-config/src/lib.rs

use std::path::Path;

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, DashboardSettings, ProviderSettings, ServerSettings, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Starts from built-in defaults.
/// 2. Reads `config/base.toml`, if present.
/// 3. Merges an environment-specific file (e.g., `config/development.toml`).
/// 4. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Same as [`load_settings`], reading the files from `config_dir`.
pub fn load_settings_from(config_dir: &Path, environment: &str) -> Result<Settings> {
    let base = config_dir.join("base");
    let env_specific = config_dir.join(environment);

    let settings = Config::builder()
        .set_default("app.environment", environment)?
        .set_default("app.log_level", "info")?
        .set_default("provider.base_url", "https://query1.finance.yahoo.com")?
        .set_default("provider.user_agent", "Mozilla/5.0 (compatible; stock-analyzer/0.1)")?
        .set_default("provider.timeout_secs", 15)?
        .set_default("provider.auto_adjust", true)?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("dashboard.default_ticker", "AAPL")?
        .set_default("dashboard.default_period", "1y")?
        // 1. Load the base configuration file.
        .add_source(File::from(base).required(false))
        // 2. Load the environment-specific configuration file.
        .add_source(File::from(env_specific).required(false))
        // 3. Load settings from environment variables (e.g., `APP_SERVER__PORT=9000`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__"))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}
