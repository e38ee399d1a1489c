use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::Serialize;

use crate::core::types::Book;
use crate::index::BookId;

/// Outcome of one free-text search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub books: Vec<Book>,
    pub search_time: Duration,
    pub relevance: u32,      // score of the top hit, 0 when empty
    pub total_results: usize, // hits returned, i.e. after truncation to the limit
}

impl SearchResult {
    pub fn empty() -> Self {
        SearchResult {
            books: Vec::new(),
            search_time: Duration::ZERO,
            relevance: 0,
            total_results: 0,
        }
    }
}

/// Record position with relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredBook {
    pub id: BookId,
    pub score: u32,
}

// Greater means worse: lower score, or equal score and later in the collection.
// The heap root is therefore the hit to drop first.
impl Ord for ScoredBook {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for ScoredBook {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Top-K collector; ties keep collection order
pub struct TopKCollector {
    pub heap: BinaryHeap<ScoredBook>,
    pub k: usize,
    pub total_collected: usize, // every match seen, before truncation
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
            k,
            total_collected: 0,
        }
    }

    pub fn collect(&mut self, scored: ScoredBook) {
        self.total_collected += 1;

        if self.heap.len() < self.k {
            self.heap.push(scored);
        } else if let Some(worst) = self.heap.peek() {
            if scored < *worst {
                self.heap.pop();
                self.heap.push(scored);
            }
        }
    }

    /// Best hit first
    pub fn get_results(self) -> Vec<ScoredBook> {
        self.heap.into_sorted_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: u32, score: u32) -> ScoredBook {
        ScoredBook { id, score }
    }

    #[test]
    fn keeps_best_k_with_stable_ties() {
        let mut collector = TopKCollector::new(3);
        for scored in [hit(0, 40), hit(1, 100), hit(2, 40), hit(3, 40), hit(4, 150)] {
            collector.collect(scored);
        }
        assert_eq!(collector.total_collected, 5);
        let ids: Vec<u32> = collector.get_results().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![4, 1, 0]);
    }

    #[test]
    fn zero_limit_collects_nothing() {
        let mut collector = TopKCollector::new(0);
        collector.collect(hit(0, 10));
        assert!(collector.get_results().is_empty());
    }
}
