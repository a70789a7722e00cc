//! Cache Store Module
//!
//! A single cache shard: HashMap storage with write-order tracking and TTL
//! freshness checks. Timestamps are passed in by the caller so the shard
//! never reads a clock itself.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, WriteOrder};
use crate::models::RestaurantSummary;

// == Cache Store ==
/// One shard of the result cache.
#[derive(Debug)]
pub struct CacheStore {
    /// Postcode -> cached restaurants
    entries: HashMap<String, CacheEntry>,
    /// Write order, oldest at the back
    order: WriteOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed (at least one)
    max_entries: usize,
    /// Freshness window in milliseconds
    ttl_ms: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries; zero is treated as one
    /// * `ttl` - How long an entry stays servable after being written
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: WriteOrder::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            ttl_ms: ttl.as_millis() as u64,
        }
    }

    // == Put ==
    /// Stores the restaurants for a key, written at `now`.
    ///
    /// An existing entry is replaced outright. Inserting a new key into a
    /// full store first evicts the least recently written entries.
    ///
    /// Returns the keys evicted to make room.
    pub fn put(&mut self, key: String, value: Vec<RestaurantSummary>, now: u64) -> Vec<String> {
        let mut evicted = Vec::new();

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                match self.order.evict_oldest() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                        self.stats.record_eviction();
                        evicted.push(oldest);
                    }
                    None => break,
                }
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, now));
        self.order.record_write(&key);
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    // == Get ==
    /// Returns the cached restaurants if the entry is still fresh at `now`.
    ///
    /// Stale entries count as misses but stay in place until the next
    /// expiry sweep.
    pub fn get(&mut self, key: &str, now: u64) -> Option<Vec<RestaurantSummary>> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl_ms) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Evict Expired ==
    /// Removes every entry written at or before `cutoff`.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&mut self, cutoff: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_by(cutoff))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        self.stats.record_expirations(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Invalidate ==
    /// Drops the entry for a key. Returns whether one was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
            true
        } else {
            false
        }
    }

    // == Evict Oldest ==
    /// Removes the least recently written entry, counting it as an eviction.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let oldest = self.order.evict_oldest()?;
        self.entries.remove(&oldest);
        self.stats.record_eviction();
        self.stats.set_total_entries(self.entries.len());
        Some(oldest)
    }

    /// Write time of the least recently written entry.
    pub fn oldest_write(&self) -> Option<u64> {
        self.order
            .peek_oldest()
            .and_then(|key| self.entries.get(key))
            .map(|entry| entry.written_at)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
