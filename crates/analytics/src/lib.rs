// In crates/analytics/src/lib.rs

pub mod engine;
pub mod types;

pub use engine::{AnalyticsEngine, TRADING_DAYS_PER_YEAR};
pub use types::{Analysis, AugmentedRow, DerivedSeries, SummaryStats};
