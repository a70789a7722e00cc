//! Query Service
//!
//! Resolves a raw postcode to restaurants: validate, consult the cache, and on
//! a miss fetch from the discovery API and store the result.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::ResultCache;
use crate::error::{AppError, Result};
use crate::models::RestaurantSummary;
use crate::upstream::RestaurantSource;
use crate::validation::{validate, NormalizedPostcode};

// == Restaurant Service ==
/// Composes validation, caching and the upstream source.
///
/// Cheap to clone; all clones share the same cache and source.
#[derive(Clone)]
pub struct RestaurantService {
    cache: Arc<ResultCache>,
    source: Arc<dyn RestaurantSource>,
}

impl RestaurantService {
    pub fn new(cache: Arc<ResultCache>, source: Arc<dyn RestaurantSource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    // == Resolve ==
    /// Returns up to ten restaurants for a raw postcode.
    ///
    /// An empty list is a valid outcome; callers decide how to report it.
    /// Upstream failures leave the cache untouched.
    pub async fn resolve(&self, raw: &str) -> Result<Vec<RestaurantSummary>> {
        let postcode = Self::parse(raw)?;

        if let Some(cached) = self.cache.get(&postcode).await {
            debug!(postcode = %postcode, count = cached.len(), "Cache hit");
            return Ok(cached);
        }
        debug!(postcode = %postcode, "Cache miss, fetching from discovery API");

        let restaurants = self
            .source
            .fetch_by_postcode(&postcode)
            .await
            .map_err(|e| {
                warn!(postcode = %postcode, error = %e, "Upstream fetch failed");
                AppError::Upstream(e)
            })?;

        // The write also sweeps stale entries from the shard it lands in;
        // the background task covers the rest.
        self.cache.put(&postcode, restaurants.clone()).await;

        Ok(restaurants)
    }

    // == Invalidate ==
    /// Drops the cached result for a raw postcode.
    ///
    /// Returns the normalized postcode that was removed.
    pub async fn invalidate(&self, raw: &str) -> Result<NormalizedPostcode> {
        let postcode = Self::parse(raw)?;

        if self.cache.invalidate(&postcode).await {
            info!(postcode = %postcode, "Cached results invalidated");
            Ok(postcode)
        } else {
            Err(AppError::NotCached(postcode.into_inner()))
        }
    }

    fn parse(raw: &str) -> Result<NormalizedPostcode> {
        validate(raw).into_result().map_err(|reason| {
            debug!(raw, %reason, "Rejected postcode");
            AppError::BadRequest(reason)
        })
    }
}
