// In crates/core-types/src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Ticker must not be empty")]
    EmptyTicker,

    #[error("Invalid ticker '{0}': only letters, digits and . - ^ = _ are allowed")]
    InvalidTicker(String),

    #[error("Unknown period '{0}' (expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, ytd, max)")]
    UnknownPeriod(String),

    #[error("A price series needs at least one bar")]
    EmptySeries,

    #[error("Bar dates must be strictly increasing: {previous} is followed by {next}")]
    UnorderedDates { previous: NaiveDate, next: NaiveDate },
}

pub type Result<T> = std::result::Result<T, Error>;
