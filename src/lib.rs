pub mod core;
pub mod index;
pub mod ingest;
pub mod query;
pub mod scoring;
pub mod search;
pub mod stats;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use crate::core::metrics::{CacheStats, PerformanceMetrics};
pub use crate::core::types::{Book, Complexity, ReadingLevel};
pub use crate::query::{FilterCriteria, SortCriterion, SortField, SortOrder};
pub use crate::search::{QueryEngine, SearchResult};
pub use crate::stats::{compute_stats, compute_stats_at, BookStats};

/*
┌──────────────────────────────── SHELFDEX LAYOUT ────────────────────────────────┐
│                                                                                  │
│  ingest ── load_books / import_csv ──▶ Vec<Book>                                 │
│                                          │                                       │
│                                          ▼                                       │
│  ┌──────────────────────────── struct QueryEngine ────────────────────────────┐  │
│  │ state:   RwLock<Arc<Snapshot>>   // books + BookIndex + generation         │  │
│  │ cache:   Mutex<SearchCache>      // (query, limit) -> SearchResult         │  │
│  │ metrics: MetricsRecorder         // atomic counters                        │  │
│  │ scorer:  Box<dyn Scorer>         // FieldWeightScorer by default           │  │
│  └────────────────────────────────────────────────────────────────────────────┘  │
│        │ search                │ filter                  │ sort                  │
│        ▼                       ▼                         ▼                       │
│  scan + TopKCollector    bitmap intersection       stable multi-key compare      │
│                          over BookIndex buckets                                  │
│                                                                                  │
│  stats ── compute_stats ──▶ BookStats   (independent linear scan, no cache)      │
└──────────────────────────────────────────────────────────────────────────────────┘
*/
