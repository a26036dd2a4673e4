// In crates/charting/src/error.rs

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to render chart: {0}")]
    Render(#[from] DrawingAreaErrorKind<std::io::Error>),
}

pub type Result<T> = std::result::Result<T, Error>;
