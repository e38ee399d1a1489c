use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};

use crate::core::config::Config;
use crate::core::metrics::{CacheStats, MetricsRecorder, PerformanceMetrics};
use crate::core::types::Book;
use crate::index::{BookIndex, IndexKey};
use crate::query::cache::{CacheKey, SearchCache};
use crate::query::filter::FilterCriteria;
use crate::query::sort::{self, SortCriterion};
use crate::scoring::scorer::{FieldWeightScorer, Scorer};
use crate::search::results::{ScoredBook, SearchResult, TopKCollector};
use crate::stats::{self, BookStats};

/// One immutable version of the collection together with its index
#[derive(Debug)]
pub struct Snapshot {
    pub books: Vec<Book>,
    pub index: BookIndex,
    pub generation: u64,
}

impl Snapshot {
    fn build(books: Vec<Book>, generation: u64) -> Self {
        let index = BookIndex::build(&books);
        Snapshot {
            books,
            index,
            generation,
        }
    }

    fn collect(&self, ids: impl IntoIterator<Item = u32>) -> Vec<Book> {
        ids.into_iter()
            .filter_map(|id| self.books.get(id as usize).cloned())
            .collect()
    }
}

/// Search, filter and sort over an indexed book collection.
///
/// All operations take `&self`. The current snapshot sits behind a lock that
/// is held only long enough to clone its `Arc`, so queries never block each
/// other; `update_books` builds the replacement off-lock and swaps it in
/// together with a cache reset.
pub struct QueryEngine {
    state: RwLock<Arc<Snapshot>>,
    cache: Mutex<SearchCache>,
    metrics: MetricsRecorder,
    scorer: Box<dyn Scorer>,
    config: Config,
}

impl QueryEngine {
    pub fn new(books: Vec<Book>) -> Self {
        Self::with_config(books, Config::default())
    }

    pub fn with_config(books: Vec<Book>, config: Config) -> Self {
        QueryEngine {
            state: RwLock::new(Arc::new(Snapshot::build(books, 0))),
            cache: Mutex::new(SearchCache::new(config.engine.search_cache_capacity)),
            metrics: MetricsRecorder::new(),
            scorer: Box::new(FieldWeightScorer::default()),
            config,
        }
    }

    /// Replace the relevance scorer; cached results are dropped
    pub fn with_scorer(mut self, scorer: Box<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self.cache.get_mut().clear();
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.read().clone()
    }

    /// Relevance-ranked free-text search, at most `limit` hits.
    ///
    /// Every distinct `(query, limit)` pair is scored once against the full
    /// collection and then served from the cache until the next update.
    pub fn search(&self, query: &str, limit: usize) -> SearchResult {
        let key = CacheKey::new(query, limit);

        let cached = self.cache.lock().get(&key).cloned();
        if let Some(result) = cached {
            self.metrics.record_cache_hit();
            tracing::trace!(%key, "search served from cache");
            return result;
        }

        let start = Instant::now();
        let snapshot = self.snapshot();
        let needle = query.to_lowercase();

        let mut collector = TopKCollector::new(limit);
        for (id, book) in (0..).zip(&snapshot.books) {
            let score = self.scorer.score(book, &needle);
            if score > 0 {
                collector.collect(ScoredBook { id, score });
            }
        }

        let matched = collector.total_collected;
        let hits = collector.get_results();
        let relevance = hits.first().map_or(0, |hit| hit.score);
        let books = snapshot.collect(hits.iter().map(|hit| hit.id));
        let search_time = start.elapsed();
        self.metrics.record_search(search_time);

        tracing::trace!(
            %key,
            scorer = self.scorer.name(),
            matched,
            returned = books.len(),
            elapsed_us = search_time.as_micros() as u64,
            "search scored"
        );

        let result = SearchResult {
            total_results: books.len(),
            books,
            search_time,
            relevance,
        };
        self.cache
            .lock()
            .insert(snapshot.generation, key, result.clone());
        result
    }

    /// `search` with the configured default limit
    pub fn search_default(&self, query: &str) -> SearchResult {
        self.search(query, self.config.engine.default_search_limit)
    }

    /// Records matching every active field of `criteria`, in collection order
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<Book> {
        let start = Instant::now();
        let snapshot = self.snapshot();

        let ids = criteria.matching_ids(&snapshot.index, &snapshot.books);
        let books = snapshot.collect(ids);

        let elapsed = start.elapsed();
        self.metrics.record_filter(elapsed);
        tracing::trace!(
            matched = books.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "filter applied"
        );
        books
    }

    /// Stable multi-key sort of `books`; the input is left untouched
    pub fn sort(&self, books: &[Book], criteria: &[SortCriterion]) -> Vec<Book> {
        let start = Instant::now();
        let sorted = sort::sort_books(books, criteria);

        let elapsed = start.elapsed();
        self.metrics.record_sort(elapsed);
        tracing::trace!(
            books = sorted.len(),
            keys = criteria.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "sort applied"
        );
        sorted
    }

    pub fn performance_metrics(&self) -> PerformanceMetrics {
        self.metrics.snapshot()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
        tracing::debug!("search cache cleared");
    }

    /// Swap in a new collection: full index rebuild plus cache reset
    pub fn update_books(&self, books: Vec<Book>) {
        let count = books.len();
        let mut next = Snapshot::build(books, 0);

        let mut state = self.state.write();
        let generation = state.generation + 1;
        next.generation = generation;
        self.cache.lock().reset(generation);
        *state = Arc::new(next);
        drop(state);

        tracing::info!(books = count, generation, "book index updated");
    }

    /// Case-insensitive exact title lookup
    pub fn find_by_title(&self, title: &str) -> Option<Book> {
        let snapshot = self.snapshot();
        let id = snapshot.index.title(title)?;
        snapshot.books.get(id as usize).cloned()
    }

    /// Every record in one index bucket, in collection order
    pub fn lookup(&self, key: IndexKey<'_>) -> Vec<Book> {
        let snapshot = self.snapshot();
        match snapshot.index.bucket(key) {
            Some(ids) => snapshot.collect(ids),
            None => Vec::new(),
        }
    }

    /// Aggregate statistics over the current collection
    pub fn stats(&self) -> BookStats {
        self.stats_at(Utc::now().date_naive())
    }

    pub fn stats_at(&self, today: NaiveDate) -> BookStats {
        let snapshot = self.snapshot();
        stats::compute_stats_with(&snapshot.books, today, &self.config.stats)
    }

    pub fn books(&self) -> Vec<Book> {
        self.snapshot().books.clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot().books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().books.is_empty()
    }
}
