//! Aggregate reading statistics.
//!
//! Everything here is a fresh linear scan over the records it is given. It
//! shares nothing with the query engine's index or cache.

pub mod counter;
pub mod efficiency;
pub mod reading_time;
pub mod recommend;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::core::config::StatsConfig;
use crate::core::types::Book;
use counter::FrequencyCounter;

pub use efficiency::ReadingEfficiency;
pub use reading_time::{format_hours, parse_reading_time};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStats {
    pub total_books: usize,
    pub total_pages: u64,
    pub average_pages_per_book: u64,
    pub books_this_year: usize,

    pub genre_distribution: BTreeMap<String, usize>,
    pub book_category_distribution: BTreeMap<String, usize>,
    pub reading_level_distribution: BTreeMap<String, usize>,
    pub complexity_distribution: BTreeMap<String, usize>,
    pub target_audience_distribution: BTreeMap<String, usize>,

    pub reading_timeline: BTreeMap<i32, usize>,       // books per year
    pub monthly_reading_pattern: BTreeMap<u32, usize>, // books per month 1-12
    pub average_reading_time: String,
    pub total_reading_time: String,

    pub top_themes: Vec<ThemeCount>,
    pub top_tags: Vec<TagCount>,
    pub most_read_authors: Vec<AuthorCount>,

    pub reading_efficiency: ReadingEfficiency,

    pub suggested_next_reads: Vec<Book>,
    pub similar_books: BTreeMap<String, Vec<Book>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeCount {
    pub theme: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCount {
    pub author: String,
    pub count: usize,
}

impl BookStats {
    /// Zero values for an empty collection
    pub fn empty() -> Self {
        let reading_time = reading_time::ReadingTimeSummary::unknown();
        BookStats {
            total_books: 0,
            total_pages: 0,
            average_pages_per_book: 0,
            books_this_year: 0,
            genre_distribution: BTreeMap::new(),
            book_category_distribution: BTreeMap::new(),
            reading_level_distribution: BTreeMap::new(),
            complexity_distribution: BTreeMap::new(),
            target_audience_distribution: BTreeMap::new(),
            reading_timeline: BTreeMap::new(),
            monthly_reading_pattern: BTreeMap::new(),
            average_reading_time: reading_time.average,
            total_reading_time: reading_time.total,
            top_themes: Vec::new(),
            top_tags: Vec::new(),
            most_read_authors: Vec::new(),
            reading_efficiency: ReadingEfficiency::unknown(),
            suggested_next_reads: Vec::new(),
            similar_books: BTreeMap::new(),
        }
    }
}

/// Statistics as of today's UTC date
pub fn compute_stats(books: &[Book]) -> BookStats {
    compute_stats_at(books, Utc::now().date_naive())
}

/// Statistics with `today` deciding which records count as this year's
pub fn compute_stats_at(books: &[Book], today: NaiveDate) -> BookStats {
    compute_stats_with(books, today, &StatsConfig::default())
}

pub fn compute_stats_with(books: &[Book], today: NaiveDate, config: &StatsConfig) -> BookStats {
    if books.is_empty() {
        return BookStats::empty();
    }

    let total_books = books.len();
    let total_pages: u64 = books.iter().map(|b| u64::from(b.pages)).sum();
    let average_pages_per_book = (total_pages as f64 / total_books as f64).round() as u64;
    let books_this_year = books.iter().filter(|b| b.reading_year == today.year()).count();

    let reading_time = reading_time::summarize(books);

    let themes: FrequencyCounter<&str> = books
        .iter()
        .flat_map(|b| b.themes.iter().map(String::as_str))
        .collect();
    let tags: FrequencyCounter<&str> = books
        .iter()
        .flat_map(|b| b.tags.iter().map(String::as_str))
        .collect();
    let authors: FrequencyCounter<&str> = books.iter().map(|b| b.author.as_str()).collect();

    let stats = BookStats {
        total_books,
        total_pages,
        average_pages_per_book,
        books_this_year,
        genre_distribution: distribution(books.iter().map(|b| Some(b.genre.as_str()))),
        book_category_distribution: distribution(books.iter().map(|b| b.book_category.as_deref())),
        reading_level_distribution: distribution(
            books.iter().map(|b| b.reading_level.map(|l| l.as_str())),
        ),
        complexity_distribution: distribution(
            books.iter().map(|b| b.complexity.map(|c| c.as_str())),
        ),
        target_audience_distribution: distribution(
            books.iter().map(|b| b.target_audience.as_deref()),
        ),
        reading_timeline: tally(books.iter().map(|b| b.reading_year)),
        monthly_reading_pattern: tally(books.iter().map(|b| b.reading_month)),
        average_reading_time: reading_time.average,
        total_reading_time: reading_time.total,
        top_themes: themes
            .top(config.top_themes)
            .into_iter()
            .map(|(theme, count)| ThemeCount { theme: theme.to_string(), count })
            .collect(),
        top_tags: tags
            .top(config.top_tags)
            .into_iter()
            .map(|(tag, count)| TagCount { tag: tag.to_string(), count })
            .collect(),
        most_read_authors: authors
            .top(config.top_authors)
            .into_iter()
            .map(|(author, count)| AuthorCount { author: author.to_string(), count })
            .collect(),
        reading_efficiency: efficiency::reading_efficiency(books),
        suggested_next_reads: recommend::suggest_next_reads(
            books,
            config.suggestion_count,
            config.recent_window,
        ),
        similar_books: recommend::group_similar_books(books),
    };

    tracing::debug!(
        books = stats.total_books,
        pages = stats.total_pages,
        genres = stats.genre_distribution.len(),
        "reading statistics computed"
    );
    stats
}

/// Frequency of each present, non-empty value
fn distribution<'a, I>(values: I) -> BTreeMap<String, usize>
where
    I: Iterator<Item = Option<&'a str>>,
{
    let mut counts = BTreeMap::new();
    for value in values.flatten().filter(|v| !v.is_empty()) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

fn tally<K: Ord>(keys: impl Iterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
