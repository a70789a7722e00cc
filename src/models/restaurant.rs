//! Restaurant summary model
//!
//! The compact restaurant representation returned to callers and stored in the cache.

use serde::{Deserialize, Serialize};

/// Highest star rating a restaurant can carry.
pub const MAX_RATING: f64 = 5.0;

// == Restaurant Summary ==
/// A single restaurant as returned by `GET /restaurants/:postcode`.
///
/// Fields are private so a summary cannot change once built. Deserializing
/// goes through [`RestaurantSummary::new`], so the rating bound holds there too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SummaryFields")]
pub struct RestaurantSummary {
    /// Display name of the restaurant
    name: String,
    /// Cuisine display names, in upstream order
    cuisines: Vec<String>,
    /// Star rating in `[0, 5]`
    rating: f64,
    /// "first line, city, postal code"
    address: String,
}

impl RestaurantSummary {
    // == Constructor ==
    /// Creates a new summary. The rating is clamped into `[0, 5]`.
    pub fn new(
        name: impl Into<String>,
        cuisines: Vec<String>,
        rating: f64,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cuisines,
            rating: rating.clamp(0.0, MAX_RATING),
            address: address.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Wire shape of a summary before validation.
#[derive(Deserialize)]
struct SummaryFields {
    name: String,
    cuisines: Vec<String>,
    rating: f64,
    address: String,
}

impl From<SummaryFields> for RestaurantSummary {
    fn from(fields: SummaryFields) -> Self {
        Self::new(fields.name, fields.cuisines, fields.rating, fields.address)
    }
}
