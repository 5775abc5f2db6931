//! Fixed-size LRU cache for parsed hosts.

use std::collections::{HashMap, VecDeque};

use crate::domain::ParsedHost;

/// Simple fixed-size cache keyed by lowercased host.
/// Uses a basic LRU strategy with a hashmap + deque.
///
/// Misses are cached too, so a stored `None` means "parsed, no result".
#[derive(Debug)]
pub struct LruCache {
    capacity: usize,
    entries: HashMap<String, Option<ParsedHost>>,
    order: VecDeque<String>,
}

impl LruCache {
    /// Create a new LRU cache with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Get a value from the cache, marking it most recently used.
    pub fn get(&mut self, key: &str) -> Option<Option<ParsedHost>> {
        let value = self.entries.get(key)?.clone();
        self.touch(key);
        Some(value)
    }

    /// Insert a value into the cache.
    pub fn insert(&mut self, key: String, value: Option<ParsedHost>) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.contains_key(&key) {
            self.touch(&key);
        } else {
            if self.entries.len() >= self.capacity {
                // Evict oldest
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
            self.order.push_back(key.clone());
        }
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear the cache.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}
