//! API Error Types
//!
//! Everything that can go wrong while fetching from the GTM backend. Pages
//! collapse all of these into one generic message; only "not found" is
//! told apart.

use thiserror::Error;

/// Fetch failure from the backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response within the request timeout
    #[error("Request timeout")]
    Timeout,

    /// Connection refused or unreachable host
    #[error("Backend unavailable")]
    Unavailable,

    /// HTTP 404
    #[error("Not found: {path}")]
    NotFound { path: String },

    /// Any other non-2xx status
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Transport failure not covered above
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Unavailable
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Request(e)
        }
    }
}
