use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Cumulative counters for one query engine.
///
/// Observational only: nothing reads these to make decisions. Counters are
/// never reset; drop the engine to start over.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    search_nanos: AtomicU64,
    filter_nanos: AtomicU64,
    sort_nanos: AtomicU64,
    total_operations: AtomicU64,
    cache_hits: AtomicU64,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A search answered by scoring the collection
    pub fn record_search(&self, elapsed: Duration) {
        self.search_nanos.fetch_add(as_nanos(elapsed), Ordering::Relaxed);
        self.total_operations.fetch_add(1, Ordering::Relaxed);
    }

    /// A search answered from the cache; contributes no elapsed time
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        self.total_operations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_filter(&self, elapsed: Duration) {
        self.filter_nanos.fetch_add(as_nanos(elapsed), Ordering::Relaxed);
        self.total_operations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sort(&self, elapsed: Duration) {
        self.sort_nanos.fetch_add(as_nanos(elapsed), Ordering::Relaxed);
        self.total_operations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PerformanceMetrics {
        let total_operations = self.total_operations.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);

        PerformanceMetrics {
            search_time: Duration::from_nanos(self.search_nanos.load(Ordering::Relaxed)),
            filter_time: Duration::from_nanos(self.filter_nanos.load(Ordering::Relaxed)),
            sort_time: Duration::from_nanos(self.sort_nanos.load(Ordering::Relaxed)),
            total_operations,
            cache_hits,
            cache_hit_rate: if total_operations == 0 {
                0.0
            } else {
                cache_hits as f64 / total_operations as f64
            },
        }
    }
}

fn as_nanos(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

/// Point-in-time copy of the engine counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub search_time: Duration, // cumulative, cache misses only
    pub filter_time: Duration,
    pub sort_time: Duration,
    pub total_operations: u64, // search + filter + sort calls, cache hits included
    pub cache_hits: u64,
    pub cache_hit_rate: f64,
}

/// Occupancy of the search cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
}
