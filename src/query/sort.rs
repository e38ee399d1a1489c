use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::core::types::Book;

/// Sort order for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,  // Ascending: 0 → 9, A → Z
    Desc, // Descending: 9 → 0, Z → A
}

/// Record fields usable as sort keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Author,
    DateFinished,
    Genre,
    Pages,
    CoverUrl,
    ReadingYear,
    ReadingMonth,
    IsCurrentlyReading,
    EnhancedGenre,
    BookCategory,
    ReadingLevel,
    Complexity,
    Themes,
    Tags,
    TargetAudience,
    ReadingTime,
    RelatedBooks,
    KeyInsights,
}

impl SortField {
    pub const ALL: [SortField; 19] = [
        SortField::Title,
        SortField::Author,
        SortField::DateFinished,
        SortField::Genre,
        SortField::Pages,
        SortField::CoverUrl,
        SortField::ReadingYear,
        SortField::ReadingMonth,
        SortField::IsCurrentlyReading,
        SortField::EnhancedGenre,
        SortField::BookCategory,
        SortField::ReadingLevel,
        SortField::Complexity,
        SortField::Themes,
        SortField::Tags,
        SortField::TargetAudience,
        SortField::ReadingTime,
        SortField::RelatedBooks,
        SortField::KeyInsights,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::DateFinished => "dateFinished",
            SortField::Genre => "genre",
            SortField::Pages => "pages",
            SortField::CoverUrl => "coverUrl",
            SortField::ReadingYear => "readingYear",
            SortField::ReadingMonth => "readingMonth",
            SortField::IsCurrentlyReading => "isCurrentlyReading",
            SortField::EnhancedGenre => "enhancedGenre",
            SortField::BookCategory => "bookCategory",
            SortField::ReadingLevel => "readingLevel",
            SortField::Complexity => "complexity",
            SortField::Themes => "themes",
            SortField::Tags => "tags",
            SortField::TargetAudience => "targetAudience",
            SortField::ReadingTime => "readingTime",
            SortField::RelatedBooks => "relatedBooks",
            SortField::KeyInsights => "keyInsights",
        }
    }

    fn value<'a>(&self, book: &'a Book) -> SortValue<'a> {
        match self {
            SortField::Title => SortValue::Text(&book.title),
            SortField::Author => SortValue::Text(&book.author),
            SortField::DateFinished => SortValue::Date(book.date_finished),
            SortField::Genre => SortValue::Text(&book.genre),
            SortField::Pages => SortValue::Number(i64::from(book.pages)),
            SortField::CoverUrl => SortValue::Text(&book.cover_url),
            SortField::ReadingYear => SortValue::Number(i64::from(book.reading_year)),
            SortField::ReadingMonth => SortValue::Number(i64::from(book.reading_month)),
            SortField::IsCurrentlyReading => SortValue::Opaque,
            SortField::EnhancedGenre => optional_text(book.enhanced_genre.as_deref()),
            SortField::BookCategory => optional_text(book.book_category.as_deref()),
            SortField::ReadingLevel => optional_text(book.reading_level.map(|l| l.as_str())),
            SortField::Complexity => optional_text(book.complexity.map(|c| c.as_str())),
            SortField::Themes => list(&book.themes),
            SortField::Tags => list(&book.tags),
            SortField::TargetAudience => optional_text(book.target_audience.as_deref()),
            SortField::ReadingTime => optional_text(book.reading_time.as_deref()),
            SortField::RelatedBooks => list(&book.related_books),
            SortField::KeyInsights => list(&book.key_insights),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown sort field: {}", s))
    }
}

/// One key of a multi-key sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    pub field: SortField,
    pub direction: SortOrder,
}

impl SortCriterion {
    pub fn asc(field: SortField) -> Self {
        SortCriterion { field, direction: SortOrder::Asc }
    }

    pub fn desc(field: SortField) -> Self {
        SortCriterion { field, direction: SortOrder::Desc }
    }
}

/// `field` or `field:asc|desc`
impl FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, dir)) => {
                let direction = match dir.trim().to_ascii_lowercase().as_str() {
                    "asc" => SortOrder::Asc,
                    "desc" => SortOrder::Desc,
                    other => return Err(format!("unknown sort direction: {}", other)),
                };
                (field, direction)
            }
            None => (s, SortOrder::Asc),
        };
        Ok(SortCriterion {
            field: field.parse()?,
            direction,
        })
    }
}

/// Field value as seen by the comparator
#[derive(Debug, Clone, Copy)]
enum SortValue<'a> {
    Missing,
    Text(&'a str),
    Number(i64),
    Date(DateTime<Utc>),
    Opaque, // present but not comparable; always ties
}

fn optional_text(value: Option<&str>) -> SortValue<'_> {
    value.map_or(SortValue::Missing, SortValue::Text)
}

fn list(values: &[String]) -> SortValue<'_> {
    if values.is_empty() {
        SortValue::Missing
    } else {
        SortValue::Opaque
    }
}

/// Stable multi-key sort; returns a new vector.
///
/// Each criterion is consulted in turn until one separates the pair. A missing
/// value orders before any present value ascending and after it descending.
pub fn sort_books(books: &[Book], criteria: &[SortCriterion]) -> Vec<Book> {
    let mut sorted = books.to_vec();
    if !criteria.is_empty() {
        sorted.sort_by(|a, b| compare_books(a, b, criteria));
    }
    sorted
}

pub fn compare_books(a: &Book, b: &Book, criteria: &[SortCriterion]) -> Ordering {
    for criterion in criteria {
        let ordering = compare_values(criterion.field.value(a), criterion.field.value(b));
        if ordering != Ordering::Equal {
            return match criterion.direction {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
        }
    }
    Ordering::Equal
}

fn compare_values(a: SortValue<'_>, b: SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Less,
        (_, SortValue::Missing) => Ordering::Greater,
        (SortValue::Text(a), SortValue::Text(b)) => locale_cmp(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => a.cmp(&b),
        (SortValue::Date(a), SortValue::Date(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

/// Three-level collation: base letters first, then accents, then case.
///
/// Strings are compared on their NFD form with combining marks dropped and
/// case folded, so "Émile" files under "e". Unaccented wins an accent tie and
/// lowercase wins a case tie.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_order_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Zeta", "zeta"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accents_sort_with_their_base_letter() {
        assert_eq!(locale_cmp("Émile", "Eve"), Ordering::Less);
        assert_eq!(locale_cmp("Émile", "Zola"), Ordering::Less);
        assert_eq!(locale_cmp("Emile", "Émile"), Ordering::Less);
        assert_eq!(locale_cmp("émile", "Émile"), Ordering::Less);
        // precomposed and decomposed spellings only differ on the final code point tie
        assert_eq!(locale_cmp("Cafe\u{301}", "Café"), Ordering::Greater);
    }

    #[test]
    fn parses_criteria() {
        let c: SortCriterion = "readingLevel:desc".parse().unwrap();
        assert_eq!(c, SortCriterion::desc(SortField::ReadingLevel));
        let c: SortCriterion = "pages".parse().unwrap();
        assert_eq!(c, SortCriterion::asc(SortField::Pages));
        assert!("pages:sideways".parse::<SortCriterion>().is_err());
        assert!("isbn".parse::<SortCriterion>().is_err());
    }

    #[test]
    fn missing_before_present_ascending() {
        assert_eq!(compare_values(SortValue::Missing, SortValue::Text("x")), Ordering::Less);
        assert_eq!(compare_values(SortValue::Number(1), SortValue::Missing), Ordering::Greater);
        assert_eq!(compare_values(SortValue::Opaque, SortValue::Opaque), Ordering::Equal);
        assert_eq!(compare_values(SortValue::Text("x"), SortValue::Number(1)), Ordering::Equal);
    }
}
