// In crates/web-server/src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message shown to users when a ticker yields no data.
pub const NO_DATA_MESSAGE: &str = "Error: No such data exists or Invalid Ticker";

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Engine(#[from] engine::Error),

    #[error(transparent)]
    Chart(#[from] charting::Error),

    #[error("Failed to bind server to address: {0}")]
    ServerBindError(std::io::Error),

    #[error("Server terminated unexpectedly: {0}")]
    Serve(std::io::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Engine(engine::Error::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            Error::Engine(engine::Error::NoData { .. }) => StatusCode::NOT_FOUND,
            Error::Engine(engine::Error::Provider(_)) => StatusCode::BAD_GATEWAY,
            Error::Engine(engine::Error::InvalidSeries(_)) => StatusCode::BAD_GATEWAY,
            Error::Chart(_) | Error::ServerBindError(_) | Error::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text shown to the user; no-data collapses to a single fixed message.
    pub fn user_message(&self) -> String {
        match self {
            Error::Engine(engine::Error::NoData { .. }) => NO_DATA_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed.");
        } else {
            tracing::debug!(error = %self, "Request rejected.");
        }
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
