//! Postcode Eats - restaurant lookup by UK postcode
//!
//! Validates postcodes, queries the Just Eat discovery API and caches the
//! results with a TTL and a size bound.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;
pub mod upstream;
pub mod validation;

pub use api::AppState;
pub use config::Config;
pub use service::RestaurantService;
pub use tasks::spawn_cleanup_task;
