use std::collections::BTreeMap;

use crate::core::types::{Book, ReadingLevel};
use crate::stats::counter::FrequencyCounter;

/// Level assumed when the recent books carry no reading level
pub const DEFAULT_LEVEL: ReadingLevel = ReadingLevel::Intermediate;

/// Books in progress if there are any, otherwise the most recently finished
/// books one reading level above what the reader has been reading lately.
pub fn suggest_next_reads(books: &[Book], count: usize, recent_window: usize) -> Vec<Book> {
    let current: Vec<Book> = books
        .iter()
        .filter(|b| b.is_currently_reading)
        .cloned()
        .collect();
    if !current.is_empty() {
        return current;
    }

    let next = current_reading_level(books, recent_window).next();
    let mut candidates: Vec<&Book> = books
        .iter()
        .filter(|b| b.reading_level == Some(next))
        .collect();
    candidates.sort_by(|a, b| b.date_finished.cmp(&a.date_finished));

    candidates.into_iter().take(count).cloned().collect()
}

/// Most common level among the `recent_window` latest finishes
pub fn current_reading_level(books: &[Book], recent_window: usize) -> ReadingLevel {
    let mut recent: Vec<&Book> = books.iter().collect();
    recent.sort_by(|a, b| b.date_finished.cmp(&a.date_finished));

    let levels: FrequencyCounter<ReadingLevel> = recent
        .into_iter()
        .take(recent_window)
        .filter_map(|b| b.reading_level)
        .collect();

    levels.most_common().copied().unwrap_or(DEFAULT_LEVEL)
}

/// Records grouped under every genre, category and theme they carry.
///
/// A record shows up once per key it contributes, so the same book can sit
/// in several groups.
pub fn group_similar_books(books: &[Book]) -> BTreeMap<String, Vec<Book>> {
    let mut groups: BTreeMap<String, Vec<Book>> = BTreeMap::new();

    for book in books {
        if !book.genre.is_empty() {
            groups.entry(book.genre.clone()).or_default().push(book.clone());
        }
        if let Some(category) = book.book_category.as_ref().filter(|c| !c.is_empty()) {
            groups.entry(category.clone()).or_default().push(book.clone());
        }
        for theme in &book.themes {
            groups.entry(theme.clone()).or_default().push(book.clone());
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn book(title: &str, day: u32, level: Option<ReadingLevel>) -> Book {
        let mut b = Book::new(title, "a", Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(), "Fiction", 100);
        b.reading_level = level;
        b
    }

    #[test]
    fn currently_reading_takes_priority() {
        let mut reading = book("Now", 1, None);
        reading.is_currently_reading = true;
        let books = vec![book("Old", 2, Some(ReadingLevel::Advanced)), reading];
        let picks = suggest_next_reads(&books, 3, 5);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].title, "Now");
    }

    #[test]
    fn no_levels_defaults_to_intermediate() {
        assert_eq!(current_reading_level(&[book("x", 1, None)], 5), ReadingLevel::Intermediate);
        assert_eq!(current_reading_level(&[], 5), ReadingLevel::Intermediate);
    }

    #[test]
    fn only_recent_window_counts() {
        let books = vec![
            book("old1", 1, Some(ReadingLevel::Advanced)),
            book("old2", 2, Some(ReadingLevel::Advanced)),
            book("new1", 10, Some(ReadingLevel::Beginner)),
        ];
        assert_eq!(current_reading_level(&books, 1), ReadingLevel::Beginner);
        assert_eq!(current_reading_level(&books, 3), ReadingLevel::Advanced);
    }

    #[test]
    fn groups_by_every_key() {
        let mut b = book("x", 1, None);
        b.book_category = Some("Classics".into());
        b.themes = vec!["war".into(), "love".into()];
        let groups = group_similar_books(&[b]);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Classics", "Fiction", "love", "war"]);
    }
}
