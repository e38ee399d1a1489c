//! Getting records in and out of files.
//!
//! JSON collections load straight into `Book`s. CSV exports go through
//! row validation and the data-quality pass before they become a
//! collection.

pub mod cleanup;
pub mod csv;
pub mod genre;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::core::error::{Error, Result};
use crate::core::types::Book;

pub use cleanup::{clean_book, fallback_cover, CleanedBook, FallbackCover};
pub use csv::{parse_csv, ProcessingResult, ProcessingStats};
pub use genre::{estimate_pages, genre_category, infer_genre_from_title, standardize_genre};

/// Reads a JSON array of records
pub fn load_books(path: &Path) -> Result<Vec<Book>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let books: Vec<Book> = serde_json::from_str(&content)?;
    tracing::info!(path = %path.display(), books = books.len(), "loaded book collection");
    Ok(books)
}

/// Writes records as a pretty-printed JSON array
pub fn save_books(path: &Path, books: &[Book]) -> Result<()> {
    let json = serde_json::to_string_pretty(books)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), books = books.len(), "saved book collection");
    Ok(())
}

/// Validates a CSV export and cleans every accepted record.
///
/// Cleaning warnings are appended after the row warnings.
pub fn import_csv(path: &Path, today: NaiveDate) -> Result<ProcessingResult> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut result = parse_csv(&content, today)?;

    let books = std::mem::take(&mut result.books);
    for book in books {
        let cleaned = clean_book(book, today);
        result.warnings.extend(cleaned.warnings);
        result.books.push(cleaned.book);
    }
    Ok(result)
}
