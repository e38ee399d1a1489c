use chrono::NaiveDate;
use serde::Serialize;

use crate::core::types::Book;
use crate::ingest::genre::{estimate_pages, infer_genre_from_title};

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/300x400/cccccc/666666?text=";
const PLACEHOLDER_TITLE_CHARS: usize = 20;

/// A record after the data-quality pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedBook {
    pub book: Book,
    pub warnings: Vec<String>,
    pub has_fallbacks: bool,
}

/// Cover to display for a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackCover {
    pub fallback_url: String,
    pub fallback_alt: String,
    pub has_fallback: bool,
}

/// Fills gaps in a record and reports each one.
///
/// A missing genre is guessed from the title, a missing page count is
/// estimated from the genre. Missing covers and future dates only warn.
pub fn clean_book(book: Book, today: NaiveDate) -> CleanedBook {
    let mut book = book;
    let mut warnings = Vec::new();

    if book.cover_url.trim().is_empty() {
        warnings.push(format!("Missing cover URL for \"{}\" - using fallback image", book.title));
    }

    if book.genre.trim().is_empty() || book.genre == "Unknown" {
        warnings.push(format!("Missing genre for \"{}\" - inferred from title", book.title));
        book.genre = infer_genre_from_title(&book.title).to_string();
    }

    if book.pages == 0 {
        warnings.push(format!("Missing page count for \"{}\" - estimated from genre", book.title));
        book.pages = estimate_pages(&book.genre);
    }

    if book.date_finished.date_naive() > today {
        warnings.push(format!("Future date detected for \"{}\" - date may be incorrect", book.title));
    }

    if book.author.trim().is_empty() {
        book.author = "Unknown Author".to_string();
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    CleanedBook {
        has_fallbacks: !warnings.is_empty(),
        book,
        warnings,
    }
}

/// The record's own cover, or a placeholder image labelled with its title
pub fn fallback_cover(book: &Book) -> FallbackCover {
    if !book.cover_url.trim().is_empty() {
        return FallbackCover {
            fallback_url: book.cover_url.clone(),
            fallback_alt: format!("Cover of {} by {}", book.title, book.author),
            has_fallback: false,
        };
    }

    let label: String = book.title.chars().take(PLACEHOLDER_TITLE_CHARS).collect();
    FallbackCover {
        fallback_url: format!("{}{}", PLACEHOLDER_BASE, urlencoding::encode(&label)),
        fallback_alt: format!("No cover available for {} by {}", book.title, book.author),
        has_fallback: true,
    }
}
