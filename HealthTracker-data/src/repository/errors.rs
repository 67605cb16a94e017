use std::sync::PoisonError;
use thiserror::Error;
use crate::backend::BackendConfigError;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Backend configuration error
    #[error("Backend configuration error: {0}")]
    Config(#[from] BackendConfigError),

    /// The request never produced a response (connect, timeout, TLS)
    #[error("Backend transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("Backend returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// The backend response could not be decoded
    #[error("Backend response could not be decoded: {0}")]
    Decode(String),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),
}

impl RepositoryError {
    /// Whether the backend rejected our credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, RepositoryError::Status { status: 401 | 403, .. })
    }
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(error: PoisonError<T>) -> Self {
        RepositoryError::Lock(error.to_string())
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            RepositoryError::Decode(error.to_string())
        } else {
            RepositoryError::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(error: serde_json::Error) -> Self {
        RepositoryError::Decode(error.to_string())
    }
}
