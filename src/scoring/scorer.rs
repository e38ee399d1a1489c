use serde::{Deserialize, Serialize};

use crate::core::types::Book;

/// Relevance scorer for free-text search
pub trait Scorer: Send + Sync {
    /// `query` arrives lower-cased. A score of 0 means "not a match".
    fn score(&self, book: &Book, query: &str) -> u32;

    fn name(&self) -> &str;
}

/// Points awarded per matching field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWeights {
    pub title: u32,
    pub exact_title: u32, // on top of `title`
    pub author: u32,
    pub genre: u32,
    pub tag: u32,         // per matching tag
    pub theme: u32,       // per matching theme
    pub key_insight: u32, // per matching insight
}

impl Default for FieldWeights {
    fn default() -> Self {
        FieldWeights {
            title: 100,
            exact_title: 50,
            author: 80,
            genre: 60,
            tag: 40,
            theme: 30,
            key_insight: 20,
        }
    }
}

/// Case-insensitive substring scorer summing weights over every matching field
#[derive(Debug, Clone, Default)]
pub struct FieldWeightScorer {
    pub weights: FieldWeights,
}

impl FieldWeightScorer {
    pub fn new(weights: FieldWeights) -> Self {
        FieldWeightScorer { weights }
    }
}

impl Scorer for FieldWeightScorer {
    fn score(&self, book: &Book, query: &str) -> u32 {
        let w = &self.weights;
        let mut score = 0;

        let title = book.title.to_lowercase();
        if title.contains(query) {
            score += w.title;
            if title == query {
                score += w.exact_title;
            }
        }

        if contains(&book.author, query) {
            score += w.author;
        }
        if contains(&book.genre, query) {
            score += w.genre;
        }

        score += w.tag * count_matches(&book.tags, query);
        score += w.theme * count_matches(&book.themes, query);
        score += w.key_insight * count_matches(&book.key_insights, query);

        score
    }

    fn name(&self) -> &str {
        "field-weight"
    }
}

fn contains(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(query)
}

fn count_matches(values: &[String], query: &str) -> u32 {
    values.iter().filter(|v| contains(v, query)).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn book(title: &str) -> Book {
        Book::new(title, "Andrew Hunt", Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(), "Technical", 352)
    }

    #[test]
    fn tag_match_only_scores_tag_weight() {
        let mut b = book("The Pragmatic Programmer");
        b.tags = vec!["programming".into()];
        assert_eq!(FieldWeightScorer::default().score(&b, "programming"), 40);
    }

    #[test]
    fn exact_title_earns_bonus() {
        let scorer = FieldWeightScorer::default();
        assert_eq!(scorer.score(&book("Dune"), "dune"), 150);
        assert_eq!(scorer.score(&book("Dune Messiah"), "dune"), 100);
    }

    #[test]
    fn repeated_matches_are_additive() {
        let mut b = book("X");
        b.themes = vec!["Craft".into(), "craftsmanship".into()];
        b.key_insights = vec!["Care about your craft".into()];
        assert_eq!(FieldWeightScorer::default().score(&b, "craft"), 30 * 2 + 20);
    }

    #[test]
    fn empty_query_matches_every_text_field() {
        let mut b = book("Refactoring");
        b.tags = vec!["a".into(), "b".into()];
        // title + author + genre + two tags; the exact-title bonus needs an empty title
        assert_eq!(FieldWeightScorer::default().score(&b, ""), 100 + 80 + 60 + 80);
    }
}
