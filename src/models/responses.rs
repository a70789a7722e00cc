//! Response DTOs for the service API
//!
//! Defines the structure of outgoing JSON bodies other than restaurant lists.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `DELETE /restaurants/:postcode`
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// The normalized postcode that was dropped
    pub postcode: String,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(postcode: impl Into<String>) -> Self {
        let postcode = postcode.into();
        Self {
            message: format!("Cached results for '{}' removed", postcode),
            postcode,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses (absent or stale)
    pub misses: u64,
    /// Number of entries evicted to honour the size bound
    pub evictions: u64,
    /// Number of stale entries removed by expiry sweeps
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse::new("LL574BB");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("LL574BB"));
        assert!(json.contains("removed"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            expirations: 2,
            total_entries: 100,
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expirations, 2);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
