//! Data models for the restaurant lookup service
//!
//! The restaurant summary returned to callers plus the JSON bodies of the
//! auxiliary endpoints.

pub mod restaurant;
pub mod responses;

// Re-export commonly used types
pub use restaurant::{RestaurantSummary, MAX_RATING};
pub use responses::{HealthResponse, InvalidateResponse, StatsResponse};
