//! Error types for the restaurant lookup service
//!
//! Provides unified error handling using thiserror. Response bodies are plain
//! text so clients can show them to users verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::UpstreamError;

// == App Error Enum ==
/// Unified error type for the lookup service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Postcode failed validation; the reason is user-facing
    #[error("{0}")]
    BadRequest(String),

    /// Lookup succeeded but returned no restaurants for the raw postcode
    #[error("No restaurants found for postcode {0}")]
    NoRestaurants(String),

    /// Nothing cached for the postcode being invalidated
    #[error("No cached results for postcode {0}")]
    NotCached(String),

    /// Discovery API failed
    #[error("Error fetching restaurant data: {0}")]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NoRestaurants(_) | AppError::NotCached(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the lookup service.
pub type Result<T> = std::result::Result<T, AppError>;
