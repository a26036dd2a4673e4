// In crates/engine/src/error.rs

use core_types::{Period, Ticker};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(core_types::Error),

    /// The provider returned nothing: unknown ticker or an empty period.
    #[error("Invalid ticker or no data available for {ticker} ({period})")]
    NoData { ticker: Ticker, period: Period },

    #[error("Price history provider failed: {0}")]
    Provider(#[from] api_client::Error),

    #[error("Provider returned an unusable series: {0}")]
    InvalidSeries(core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
