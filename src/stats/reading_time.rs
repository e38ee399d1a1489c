use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::Book;

static HOURS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*hours?").unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

pub const UNKNOWN: &str = "Unknown";

/// Hours from strings like "6 hours", "1 hour", "2-3 hours" or "8".
///
/// An explicit "<n> hours" wins; otherwise the first integer in the string
/// is taken. Digit runs too long for an integer still parse, as a float.
/// Returns `None` when there is no number at all.
pub fn parse_reading_time(value: &str) -> Option<f64> {
    let digits = HOURS
        .captures(value)
        .and_then(|caps| caps.get(1))
        .or_else(|| NUMBER.find(value))?;
    digits.as_str().parse().ok()
}

/// Human-scale duration: minutes below an hour, hours below a day, else days
pub fn format_hours(hours: f64) -> String {
    if hours < 1.0 {
        format!("{} minutes", (hours * 60.0).round() as i64)
    } else if hours < 24.0 {
        format!("{} hours", hours.round() as i64)
    } else {
        format!("{} days", (hours / 24.0).round() as i64)
    }
}

/// Average and total estimated reading time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingTimeSummary {
    pub average: String,
    pub total: String,
}

impl ReadingTimeSummary {
    pub fn unknown() -> Self {
        ReadingTimeSummary {
            average: UNKNOWN.to_string(),
            total: UNKNOWN.to_string(),
        }
    }
}

/// Records with no parseable, positive reading time are left out of the average
pub fn summarize(books: &[Book]) -> ReadingTimeSummary {
    let hours: Vec<f64> = books
        .iter()
        .filter_map(|book| book.reading_time.as_deref())
        .filter_map(parse_reading_time)
        .filter(|&h| h > 0.0)
        .collect();

    if hours.is_empty() {
        return ReadingTimeSummary::unknown();
    }

    let total: f64 = hours.iter().sum();
    let average = total / hours.len() as f64;

    ReadingTimeSummary {
        average: format_hours(average),
        total: format_hours(total),
    }
}
