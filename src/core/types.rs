use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the reading log.
///
/// The enrichment fields are either all absent or were all written by the
/// same enrichment pass; the core never sees a half-enriched record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub author: String,
    #[serde(with = "date_format")]
    pub date_finished: DateTime<Utc>,
    pub genre: String,
    pub pages: u32,
    #[serde(default)]
    pub cover_url: String,
    pub reading_year: i32,
    pub reading_month: u32, // 1-12
    #[serde(default)]
    pub is_currently_reading: bool,

    // Enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_level: Option<ReadingLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<String>, // "<n> hours"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_books: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_insights: Vec<String>,
}

impl Book {
    /// Unenriched record; reading year and month are taken from `date_finished`
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        date_finished: DateTime<Utc>,
        genre: impl Into<String>,
        pages: u32,
    ) -> Self {
        Book {
            title: title.into(),
            author: author.into(),
            date_finished,
            genre: genre.into(),
            pages,
            cover_url: String::new(),
            reading_year: date_finished.year(),
            reading_month: date_finished.month(),
            is_currently_reading: false,
            enhanced_genre: None,
            book_category: None,
            reading_level: None,
            complexity: None,
            themes: Vec::new(),
            tags: Vec::new(),
            target_audience: None,
            reading_time: None,
            related_books: Vec::new(),
            key_insights: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadingLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ReadingLevel {
    pub const ALL: [ReadingLevel; 3] = [
        ReadingLevel::Beginner,
        ReadingLevel::Intermediate,
        ReadingLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "Beginner",
            ReadingLevel::Intermediate => "Intermediate",
            ReadingLevel::Advanced => "Advanced",
        }
    }

    /// One step up the progression, capped at `Advanced`
    pub fn next(&self) -> ReadingLevel {
        match self {
            ReadingLevel::Beginner => ReadingLevel::Intermediate,
            ReadingLevel::Intermediate | ReadingLevel::Advanced => ReadingLevel::Advanced,
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReadingLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown reading level: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Simple, Complexity::Moderate, Complexity::Complex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Moderate => "Moderate",
            Complexity::Complex => "Complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Complexity::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown complexity: {}", s))
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (UTC midnight)
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub mod date_format {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date: {}", raw)))
    }
}
