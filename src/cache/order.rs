//! Write Order Module
//!
//! Tracks the order in which keys were last written, for size-bound eviction.

use std::collections::VecDeque;

// == Write Order ==
/// Tracks write order for oldest-first eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently written
/// - Back = Least recently written
#[derive(Debug, Default)]
pub struct WriteOrder {
    order: VecDeque<String>,
}

impl WriteOrder {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record Write ==
    /// Marks a key as just written (moves to front).
    pub fn record_write(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently written key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Peek Oldest ==
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.back()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
