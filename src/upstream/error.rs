//! Upstream fetch error types.

use thiserror::Error;

/// Message surfaced when the discovery API cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: Please check your internet connection";

/// Failures talking to the restaurant discovery API.
///
/// The display text is what ends up in the 500 response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network,

    /// No response within the configured timeout
    #[error("Request to restaurant provider timed out")]
    Timeout,

    /// Non-success status; `message` is the best text extracted from the body
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Success status but a body that is not a discovery response
    #[error("Invalid response from restaurant provider: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Classifies a reqwest failure that happened before a status was seen.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Network
        }
    }

    /// HTTP status of the failed call, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
