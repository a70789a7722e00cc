//! Cache Entry Module
//!
//! A cached restaurant list together with the time it was written.

use crate::models::RestaurantSummary;

// == Cache Entry ==
/// Represents a single cached lookup result.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Restaurants fetched for the postcode
    pub value: Vec<RestaurantSummary>,
    /// Write timestamp (Unix milliseconds)
    pub written_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(value: Vec<RestaurantSummary>, written_at: u64) -> Self {
        Self { value, written_at }
    }

    // == Age ==
    /// Milliseconds since the entry was written. Zero if `now` is earlier.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.written_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals the TTL is still fresh;
    /// it goes stale strictly after that.
    pub fn is_fresh(&self, now: u64, ttl_ms: u64) -> bool {
        self.age_ms(now) <= ttl_ms
    }

    // == Is Expired By ==
    /// True when the entry was written at or before `cutoff`.
    pub fn is_expired_by(&self, cutoff: u64) -> bool {
        self.written_at <= cutoff
    }
}
