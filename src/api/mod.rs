//! API Module
//!
//! HTTP handlers and routing for the restaurant lookup REST API.
//!
//! # Endpoints
//! - `GET /restaurants/:postcode` - Restaurants for a postcode
//! - `DELETE /restaurants/:postcode` - Invalidate a cached lookup
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
