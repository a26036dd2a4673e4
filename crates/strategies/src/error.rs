// In crates/strategies/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid moving average window: {0}")]
    InvalidWindow(String),
}

pub type Result<T> = std::result::Result<T, Error>;
