// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or consent is not given. Shown inline
    /// next to the offending control, never sent to the network.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure talking to the backend.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered but refused the request (non-2xx status or an
    /// explicit `ok: false` in the body).
    #[error("{0}")]
    ServerRejected(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}
