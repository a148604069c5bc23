//! Errors that can occur when talking to the remote services.

use thiserror::Error;

/// Errors from the identification and recommendation clients.
///
/// The body of a non-success response is never read, so `Status` only
/// carries the code.
#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Failed to build request: {0}")]
    InvalidRequest(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service responded with HTTP {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiClientError {
    /// True when the request never got a response in time
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiClientError::Transport(e) if e.is_timeout())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ApiClientError>;
