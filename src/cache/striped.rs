//! Result Cache
//!
//! The shared, lock-striped cache of lookup results. Keys are hashed onto a
//! fixed set of shards, each behind its own lock, so lookups for unrelated
//! postcodes rarely wait on each other. The size bound is global: a shared
//! entry count decides when the oldest write anywhere in the cache has to go.

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock};
use crate::config::Config;
use crate::models::RestaurantSummary;
use crate::validation::NormalizedPostcode;

/// Shard count used when none is configured
pub const DEFAULT_SHARDS: usize = 16;

// == Result Cache ==
/// Bounded, time-expiring map from normalized postcode to restaurant list.
#[derive(Debug)]
pub struct ResultCache {
    shards: Vec<RwLock<CacheStore>>,
    hasher: RandomState,
    /// Entries held across all shards, never above `max_entries`
    entries: AtomicUsize,
    max_entries: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ResultCache {
    // == Constructors ==
    /// Creates a cache holding at most `max_entries` results for `ttl` each.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self::with_shards(max_entries, ttl, DEFAULT_SHARDS)
    }

    /// Creates a cache with an explicit shard count.
    ///
    /// Shards share one capacity of `max_entries`; a zero count of either is
    /// treated as one.
    pub fn with_shards(max_entries: usize, ttl: Duration, shard_count: usize) -> Self {
        let max_entries = max_entries.max(1);
        let shard_count = shard_count.max(1);

        let shards = (0..shard_count)
            .map(|_| RwLock::new(CacheStore::new(max_entries, ttl)))
            .collect();

        Self {
            shards,
            hasher: RandomState::new(),
            entries: AtomicUsize::new(0),
            max_entries,
            ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a cache from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_shards(
            config.max_entries,
            Duration::from_secs(config.cache_ttl),
            config.cache_shards,
        )
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn shard_index(&self, key: &str) -> usize {
        (self.hasher.hash_one(key) as usize) % self.shards.len()
    }

    fn shard_for(&self, key: &str) -> &RwLock<CacheStore> {
        &self.shards[self.shard_index(key)]
    }

    /// Claims a slot for a new key if the cache is below its bound.
    fn try_reserve_slot(&self) -> bool {
        self.entries
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |held| {
                (held < self.max_entries).then_some(held + 1)
            })
            .is_ok()
    }

    fn release_slots(&self, count: usize) {
        if count > 0 {
            self.entries.fetch_sub(count, Ordering::SeqCst);
        }
    }

    // == Get ==
    /// Returns the cached restaurants for a postcode if they are still fresh.
    pub async fn get(&self, key: &NormalizedPostcode) -> Option<Vec<RestaurantSummary>> {
        let now = self.clock.now_ms();
        let mut shard = self.shard_for(key.as_str()).write().await;
        shard.get(key.as_str(), now)
    }

    // == Put ==
    /// Stores restaurants for a postcode, stamped with the current time.
    ///
    /// Stale entries in the written shard are swept first. A new key arriving
    /// while the cache is full evicts the oldest write across all shards.
    pub async fn put(&self, key: &NormalizedPostcode, value: Vec<RestaurantSummary>) {
        let key = key.as_str();
        let now = self.clock.now_ms();
        let cutoff = now.saturating_sub(self.ttl.as_millis() as u64);
        let mut swept = false;

        loop {
            {
                let mut shard = self.shard_for(key).write().await;
                if !swept {
                    let expired = shard.evict_expired(cutoff);
                    self.release_slots(expired);
                    if expired > 0 {
                        debug!("Swept {} stale entries from written shard", expired);
                    }
                    swept = true;
                }

                if shard.contains(key) || self.try_reserve_slot() {
                    shard.put(key.to_string(), value, now);
                    break;
                }
            }

            // Full: make room without holding the target shard's lock.
            match self.evict_oldest_write().await {
                Some(old) => {
                    debug!(postcode = %old, "Evicted oldest cache entry to stay within size bound")
                }
                None => tokio::task::yield_now().await,
            }
        }
    }

    /// Removes the entry with the earliest write time across all shards.
    async fn evict_oldest_write(&self) -> Option<String> {
        let mut oldest: Option<(usize, u64)> = None;
        for (index, shard) in self.shards.iter().enumerate() {
            if let Some(written_at) = shard.read().await.oldest_write() {
                if oldest.map_or(true, |(_, best)| written_at < best) {
                    oldest = Some((index, written_at));
                }
            }
        }

        let (index, _) = oldest?;
        let evicted = self.shards[index].write().await.evict_oldest()?;
        self.release_slots(1);
        Some(evicted)
    }

    // == Evict Expired ==
    /// Removes every entry written at or before `cutoff` (Unix ms) across all
    /// shards. Returns the number removed.
    pub async fn evict_expired(&self, cutoff: u64) -> usize {
        let mut removed = 0;
        for shard in &self.shards {
            let expired = shard.write().await.evict_expired(cutoff);
            self.release_slots(expired);
            removed += expired;
        }
        removed
    }

    /// The cutoff that separates fresh entries from stale ones right now.
    pub fn expiry_cutoff(&self) -> u64 {
        self.clock
            .now_ms()
            .saturating_sub(self.ttl.as_millis() as u64)
    }

    // == Invalidate ==
    /// Drops a postcode's entry. Returns whether one was present.
    pub async fn invalidate(&self, key: &NormalizedPostcode) -> bool {
        let removed = self
            .shard_for(key.as_str())
            .write()
            .await
            .invalidate(key.as_str());
        if removed {
            self.release_slots(1);
        }
        removed
    }

    // == Stats ==
    /// Statistics summed over all shards.
    pub async fn stats(&self) -> CacheStats {
        let mut total = CacheStats::new();
        for shard in &self.shards {
            total.merge(&shard.read().await.stats());
        }
        total
    }

    pub async fn len(&self) -> usize {
        let mut len = 0;
        for shard in &self.shards {
            len += shard.read().await.len();
        }
        len
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Maximum number of entries across all shards.
    pub fn capacity(&self) -> usize {
        self.max_entries
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::validation::validate;

    const TTL: Duration = Duration::from_secs(1800);

    fn postcode(raw: &str) -> NormalizedPostcode {
        validate(raw).into_result().unwrap()
    }

    fn restaurants(name: &str) -> Vec<RestaurantSummary> {
        vec![RestaurantSummary::new(
            name,
            vec!["Indian".to_string(), "Curry".to_string()],
            3.9,
            "2 Station Road, Bangor, LL57 4BB",
        )]
    }

    fn manual_cache(max_entries: usize, shards: usize) -> (ResultCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let cache = ResultCache::with_shards(max_entries, TTL, shards).with_clock(clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let (cache, _) = manual_cache(100, 4);
        let key = postcode("LL57 4BB");

        cache.put(&key, restaurants("Spice")).await;

        assert_eq!(cache.get(&key).await, Some(restaurants("Spice")));
    }

    #[tokio::test]
    async fn test_expiry_window() {
        let (cache, clock) = manual_cache(100, 4);
        let key = postcode("LL57 4BB");
        let epsilon = Duration::from_millis(1);

        cache.put(&key, restaurants("Spice")).await;

        clock.advance(TTL - epsilon);
        assert!(cache.get(&key).await.is_some());

        clock.advance(epsilon * 2);
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_evict_expired_uses_cutoff() {
        let (cache, clock) = manual_cache(100, 4);
        let old = postcode("M1 1AE");
        let fresh = postcode("B33 8TH");

        cache.put(&old, restaurants("old")).await;
        clock.advance(Duration::from_secs(60));
        cache.put(&fresh, restaurants("fresh")).await;

        clock.advance(TTL - Duration::from_secs(30));
        let removed = cache.evict_expired(cache.expiry_cutoff()).await;

        assert_eq!(removed, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get(&fresh).await.is_some());
    }

    #[tokio::test]
    async fn test_fills_to_capacity_without_evicting() {
        let (cache, clock) = manual_cache(10, 16);
        assert_eq!(cache.capacity(), 10);

        for district in 1..=10 {
            cache.put(&postcode(&format!("M{} 1AE", district)), restaurants("r")).await;
            clock.advance(Duration::from_millis(1));
        }

        assert_eq!(cache.len().await, 10);
        assert_eq!(cache.stats().await.evictions, 0);

        cache.put(&postcode("M11 1AE"), restaurants("r")).await;

        assert_eq!(cache.len().await, 10);
        assert_eq!(cache.stats().await.evictions, 1);
        assert!(cache.get(&postcode("M1 1AE")).await.is_none());
        assert!(cache.get(&postcode("M11 1AE")).await.is_some());
    }

    #[tokio::test]
    async fn test_default_capacity_is_fully_usable() {
        let cache = ResultCache::new(1000, TTL);
        assert_eq!(cache.capacity(), 1000);

        for district in 1..=99 {
            for sector in 0..=9 {
                let key = postcode(&format!("M{} {}AE", district, sector));
                cache.put(&key, Vec::new()).await;
            }
        }
        assert_eq!(cache.len().await, 990);
        assert_eq!(cache.stats().await.evictions, 0);
    }

    #[tokio::test]
    async fn test_full_cache_evicts_oldest_write_in_any_shard() {
        let (cache, clock) = manual_cache(3, 4);
        let keys: Vec<NormalizedPostcode> = ["M1 1AE", "M2 1AE", "M3 1AE", "M4 1AE"]
            .iter()
            .map(|raw| postcode(raw))
            .collect();

        for key in &keys {
            cache.put(key, restaurants(key.as_str())).await;
            clock.advance(Duration::from_millis(5));
        }

        assert_eq!(cache.len().await, 3);
        assert!(cache.get(&keys[0]).await.is_none());
        for key in &keys[1..] {
            assert!(cache.get(key).await.is_some());
        }
    }

    #[tokio::test]
    async fn test_overwrite_at_capacity_does_not_evict() {
        let (cache, _) = manual_cache(2, 4);
        let first = postcode("M1 1AE");
        let second = postcode("M2 1AE");

        cache.put(&first, restaurants("1")).await;
        cache.put(&second, restaurants("2")).await;
        cache.put(&first, restaurants("1b")).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.stats().await.evictions, 0);
        assert_eq!(cache.get(&first).await, Some(restaurants("1b")));
    }

    #[tokio::test]
    async fn test_put_sweeps_only_the_written_shard() {
        let (cache, clock) = manual_cache(100, 4);
        let keys: Vec<NormalizedPostcode> =
            (1..=60).map(|d| postcode(&format!("M{} 1AE", d))).collect();
        let target = &keys[0];
        let shard = cache.shard_index(target.as_str());
        let neighbour = keys[1..]
            .iter()
            .find(|k| cache.shard_index(k.as_str()) == shard)
            .unwrap();
        let elsewhere = keys[1..]
            .iter()
            .find(|k| cache.shard_index(k.as_str()) != shard)
            .unwrap();

        cache.put(neighbour, restaurants("stale")).await;
        cache.put(elsewhere, restaurants("stale")).await;
        clock.advance(TTL + Duration::from_secs(1));
        cache.put(target, restaurants("fresh")).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.stats().await.expirations, 1);

        assert_eq!(cache.evict_expired(cache.expiry_cutoff()).await, 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_freed_slots_are_reused() {
        let (cache, clock) = manual_cache(2, 4);
        let first = postcode("M1 1AE");

        cache.put(&first, restaurants("1")).await;
        cache.put(&postcode("M2 1AE"), restaurants("2")).await;
        assert!(cache.invalidate(&first).await);

        clock.advance(TTL + Duration::from_secs(1));
        assert_eq!(cache.evict_expired(cache.expiry_cutoff()).await, 1);

        cache.put(&postcode("M3 1AE"), restaurants("3")).await;
        cache.put(&postcode("M4 1AE"), restaurants("4")).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.stats().await.evictions, 0);
    }

    #[tokio::test]
    async fn test_never_exceeds_capacity() {
        let (cache, clock) = manual_cache(5, 2);
        for raw in [
            "M1 1AE", "M2 1AE", "M3 1AE", "M4 1AE", "M5 1AE", "M6 1AE", "M7 1AE", "M8 1AE",
        ] {
            cache.put(&postcode(raw), restaurants(raw)).await;
            clock.advance(Duration::from_millis(10));
            assert!(cache.len().await <= 5);
        }
    }

    #[tokio::test]
    async fn test_single_shard_evicts_oldest_write() {
        let (cache, clock) = manual_cache(2, 1);
        let first = postcode("M1 1AE");
        let second = postcode("M2 1AE");
        let third = postcode("M3 1AE");

        cache.put(&first, restaurants("1")).await;
        clock.advance(Duration::from_millis(1));
        cache.put(&second, restaurants("2")).await;
        clock.advance(Duration::from_millis(1));
        cache.put(&third, restaurants("3")).await;

        assert!(cache.get(&first).await.is_none());
        assert!(cache.get(&second).await.is_some());
        assert!(cache.get(&third).await.is_some());
        assert_eq!(cache.stats().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_invalidate() {
        let (cache, _) = manual_cache(100, 4);
        let key = postcode("LL57 4BB");

        cache.put(&key, restaurants("Spice")).await;

        assert!(cache.invalidate(&key).await);
        assert!(!cache.invalidate(&key).await);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_puts_on_distinct_keys() {
        let cache = Arc::new(ResultCache::new(1000, TTL));
        let mut handles = Vec::new();

        for district in 1..=50 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                let key = postcode(&format!("M{} 1AE", district));
                cache.put(&key, restaurants(key.as_str())).await;
                cache.get(&key).await
            }));
        }

        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }
        assert_eq!(cache.len().await, 50);
    }

    #[tokio::test]
    async fn test_stats_are_summed() {
        let (cache, _) = manual_cache(100, 4);
        let key = postcode("LL57 4BB");

        cache.put(&key, restaurants("Spice")).await;
        cache.get(&key).await;
        cache.get(&postcode("M1 1AE")).await;

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
