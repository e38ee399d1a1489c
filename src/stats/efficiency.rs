use serde::{Deserialize, Serialize};

use crate::core::types::Book;
use crate::stats::reading_time::{format_hours, UNKNOWN};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Throughput over the span between the first and last finish date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingEfficiency {
    pub pages_per_day: f64,
    pub books_per_month: f64,
    pub average_completion_time: String, // mean gap between consecutive finishes
}

impl ReadingEfficiency {
    pub fn unknown() -> Self {
        ReadingEfficiency {
            pages_per_day: 0.0,
            books_per_month: 0.0,
            average_completion_time: UNKNOWN.to_string(),
        }
    }
}

pub fn reading_efficiency(books: &[Book]) -> ReadingEfficiency {
    let (Some(first), Some(last)) = (
        books.iter().map(|b| b.date_finished).min(),
        books.iter().map(|b| b.date_finished).max(),
    ) else {
        return ReadingEfficiency::unknown();
    };

    let span_millis = (last - first).num_milliseconds() as f64;
    let total_days = (span_millis / MILLIS_PER_DAY).ceil();
    let total_pages: u64 = books.iter().map(|b| u64::from(b.pages)).sum();
    let count = books.len() as f64;

    let (pages_per_day, books_per_month) = if total_days > 0.0 {
        (
            round2(total_pages as f64 / total_days),
            round2(count / (total_days / 30.0)),
        )
    } else {
        (0.0, 0.0)
    };

    let days_between = if books.len() > 1 {
        total_days / (count - 1.0)
    } else {
        0.0
    };

    ReadingEfficiency {
        pages_per_day,
        books_per_month,
        average_completion_time: format_hours(days_between * 24.0),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn finished(y: i32, m: u32, d: u32, pages: u32) -> Book {
        Book::new("t", "a", Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(), "g", pages)
    }

    #[test]
    fn span_based_rates() {
        let books = [
            finished(2024, 1, 1, 300),
            finished(2024, 1, 31, 300),
            finished(2024, 3, 1, 300),
        ];
        // 60 day span
        let eff = reading_efficiency(&books);
        assert_eq!(eff.pages_per_day, 15.0);
        assert_eq!(eff.books_per_month, 1.5);
        assert_eq!(eff.average_completion_time, "30 days");
    }

    #[test]
    fn single_book_has_no_span() {
        let eff = reading_efficiency(&[finished(2024, 5, 5, 120)]);
        assert_eq!(eff.pages_per_day, 0.0);
        assert_eq!(eff.books_per_month, 0.0);
        assert_eq!(eff.average_completion_time, "0 minutes");
    }

    #[test]
    fn empty_is_unknown() {
        assert_eq!(reading_efficiency(&[]), ReadingEfficiency::unknown());
    }
}
