//! Discovery API wire types.
//!
//! Only the fields the service reads are modelled; everything else in the
//! (large) discovery payload is ignored.

use serde::Deserialize;

/// Top-level response of the by-postcode discovery endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DiscoveryResponse {
    #[serde(default)]
    pub restaurants: Vec<Venue>,
}

/// A restaurant as listed by the discovery API.
#[derive(Debug, Clone, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cuisines: Vec<CuisineTag>,
    pub rating: VenueRating,
    pub address: VenueAddress,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuisineTag {
    /// Display name, e.g. "Pizza"
    pub name: String,
    /// Canonical slug, e.g. "pizza"
    pub unique_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueRating {
    pub star_rating: f64,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueAddress {
    pub first_line: String,
    pub city: String,
    pub postal_code: String,
}

/// Error body some upstream failures carry.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}
