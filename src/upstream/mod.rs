//! Restaurant discovery upstream.
//!
//! This module provides the HTTP client for the Just Eat discovery API
//! and the [`RestaurantSource`] seam the query service depends on.
//!
//! Key characteristics of the discovery API:
//! - Listings are keyed by postcode in the URL path, without spaces
//! - Responses are large; only name, cuisines, rating and address are kept
//! - Failures may carry a `{"message": ...}` JSON body, plain text, or nothing

mod client;
mod convert;
mod error;
mod types;

use async_trait::async_trait;

use crate::models::RestaurantSummary;
use crate::validation::NormalizedPostcode;

pub use client::{
    error_message, DiscoveryClient, DiscoveryConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
pub use convert::{summarize, summarize_venue, MAX_RESULTS};
pub use error::{UpstreamError, NETWORK_ERROR_MESSAGE};
pub use types::{CuisineTag, DiscoveryResponse, ErrorPayload, Venue, VenueAddress, VenueRating};

/// Anything that can list restaurants for a validated postcode.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    /// Returns at most [`MAX_RESULTS`] restaurants, in provider order.
    async fn fetch_by_postcode(
        &self,
        postcode: &NormalizedPostcode,
    ) -> Result<Vec<RestaurantSummary>, UpstreamError>;
}
