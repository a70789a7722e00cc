//! Cache Module
//!
//! In-memory cache of postcode lookups with TTL freshness, write-order
//! eviction and lock striping.

mod clock;
mod entry;
mod order;
mod stats;
mod store;
mod striped;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use order::WriteOrder;
pub use stats::CacheStats;
pub use store::CacheStore;
pub use striped::{ResultCache, DEFAULT_SHARDS};
