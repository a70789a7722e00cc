//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, invalidate_handler, restaurants_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /restaurants/:postcode` - Look up restaurants for a postcode
/// - `DELETE /restaurants/:postcode` - Drop the cached lookup for a postcode
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, so browser front-ends can call the service
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/restaurants/:postcode",
            get(restaurants_handler).delete(invalidate_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResultCache;
    use crate::models::RestaurantSummary;
    use crate::upstream::{RestaurantSource, UpstreamError};
    use crate::validation::NormalizedPostcode;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    struct DownSource;

    #[async_trait]
    impl RestaurantSource for DownSource {
        async fn fetch_by_postcode(
            &self,
            _postcode: &NormalizedPostcode,
        ) -> Result<Vec<RestaurantSummary>, UpstreamError> {
            Err(UpstreamError::Network)
        }
    }

    fn create_test_app() -> Router {
        let cache = Arc::new(ResultCache::new(100, Duration::from_secs(300)));
        create_router(AppState::new(cache, Arc::new(DownSource)))
    }

    async fn get_status(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(get_status("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(get_status("/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_short_postcode_is_bad_request() {
        assert_eq!(get_status("/restaurants/LL").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upstream_down_is_server_error() {
        assert_eq!(
            get_status("/restaurants/LL574BB").await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
