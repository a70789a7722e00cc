//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::ResultCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{HealthResponse, InvalidateResponse, RestaurantSummary, StatsResponse};
use crate::service::RestaurantService;
use crate::upstream::{DiscoveryClient, DiscoveryConfig, RestaurantSource};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lookup pipeline, holding the shared cache
    pub service: RestaurantService,
}

impl AppState {
    /// Creates a new AppState around an existing cache and source.
    pub fn new(cache: Arc<ResultCache>, source: Arc<dyn RestaurantSource>) -> Self {
        Self {
            service: RestaurantService::new(cache, source),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache and the discovery client. Fails only if the HTTP
    /// client cannot be constructed.
    pub fn from_config(config: &Config) -> std::result::Result<Self, reqwest::Error> {
        let cache = Arc::new(ResultCache::from_config(config));
        let client = DiscoveryClient::new(
            DiscoveryConfig::new()
                .with_base_url(config.upstream_base_url.clone())
                .with_timeout(config.upstream_timeout),
        )?;
        Ok(Self::new(cache, Arc::new(client)))
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        self.service.cache()
    }
}

/// Handler for GET /restaurants/:postcode
///
/// Returns up to ten restaurants as a JSON array. An empty lookup is
/// reported as 404 with the postcode as the caller typed it.
pub async fn restaurants_handler(
    State(state): State<AppState>,
    Path(postcode): Path<String>,
) -> Result<Json<Vec<RestaurantSummary>>> {
    let restaurants = state.service.resolve(&postcode).await?;

    if restaurants.is_empty() {
        info!(postcode = %postcode, "No restaurants found");
        return Err(AppError::NoRestaurants(postcode));
    }

    Ok(Json(restaurants))
}

/// Handler for DELETE /restaurants/:postcode
///
/// Drops the cached lookup so the next request goes to the discovery API.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(postcode): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let removed = state.service.invalidate(&postcode).await?;
    Ok(Json(InvalidateResponse::new(removed.into_inner())))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache().stats().await;
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
