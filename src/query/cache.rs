use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::core::metrics::CacheStats;
use crate::search::results::SearchResult;

/// Bounded cache of search results with oldest-inserted eviction.
///
/// Lookups go through `peek`, which leaves recency untouched, so the LRU
/// order of the underlying cache is exactly insertion order and the entry
/// evicted on overflow is always the oldest insert.
///
/// The cache is tagged with the generation of the collection its results
/// were computed from. Inserts carry the generation they were scored under
/// and are dropped when it is no longer current, which keeps results for a
/// replaced collection out of the cache.
pub struct SearchCache {
    entries: LruCache<CacheKey, SearchResult>,
    generation: u64,
}

/// `<query>:<limit>`
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub query: String,
    pub limit: usize,
}

impl CacheKey {
    pub fn new(query: &str, limit: usize) -> Self {
        CacheKey {
            query: query.to_string(),
            limit,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.query, self.limit)
    }
}

impl SearchCache {
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        SearchCache {
            entries: LruCache::new(cap),
            generation: 0,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<&SearchResult> {
        self.entries.peek(key)
    }

    /// Returns false when the result belongs to a superseded generation
    pub fn insert(&mut self, generation: u64, key: CacheKey, result: SearchResult) -> bool {
        if generation != self.generation {
            return false;
        }
        if let Some((evicted, _)) = self.entries.push(key.clone(), result) {
            if evicted != key {
                tracing::trace!(key = %evicted, "search cache evicted oldest entry");
            }
        }
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Empty the cache and bind it to another collection generation
    pub fn reset(&mut self, generation: u64) {
        self.entries.clear();
        self.generation = generation;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            capacity: self.entries.cap().get(),
        }
    }
}
