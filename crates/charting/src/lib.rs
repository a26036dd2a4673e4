// In crates/charting/src/lib.rs

pub mod error;
pub mod price_chart;

pub use error::{Error, Result};
pub use price_chart::{render_price_chart, ChartOptions};
