use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::core::error::{Error, Result};
use crate::core::types::{parse_date, Book};

pub const COLUMN_TITLE: &str = "Title";
pub const COLUMN_AUTHOR: &str = "Author";
pub const COLUMN_DATE: &str = "Date Finished";
pub const COLUMN_GENRE: &str = "Genre";
pub const COLUMN_PAGES: &str = "Pages";
pub const COLUMN_COVER: &str = "Cover URL";

const MAX_TITLE: usize = 200;
const MAX_AUTHOR: usize = 100;
const MAX_GENRE: usize = 50;
const MAX_COVER: usize = 500;
const MAX_PAGES: u32 = 10_000;

/// Outcome of importing one CSV file
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    pub books: Vec<Book>,
    pub errors: Vec<String>,   // "Row N: <message>"
    pub warnings: Vec<String>,
    pub stats: ProcessingStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub total_rows: usize,
    pub successful_rows: usize,
    pub failed_rows: usize,
    pub skipped_rows: usize,
    pub warning_rows: usize,
}

/// Splits CSV text into records of trimmed cells.
///
/// Double-quoted cells may hold commas, newlines and `""` escapes. Lines
/// with nothing on them are dropped.
pub fn split_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    cell.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => cell.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut cell).trim().to_string()),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut cell).trim().to_string());
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => cell.push(c),
        }
    }

    if !cell.is_empty() || !record.is_empty() {
        record.push(cell.trim().to_string());
        push_record(&mut records, record);
    }
    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    // a bare newline yields a single empty cell
    if record.len() == 1 && record[0].is_empty() {
        return;
    }
    records.push(record);
}

/// Header-addressed view of one data row
struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    fn get(&self, column: &str) -> &'a str {
        self.columns
            .get(column)
            .and_then(|&i| self.cells.get(i))
            .map_or("", String::as_str)
    }

    fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }
}

/// Validates every data row of a reading-log export.
///
/// Rows that fail validation are reported in `errors` and do not stop the
/// import. Only a header without Title and Author columns is fatal.
pub fn parse_csv(content: &str, today: NaiveDate) -> Result<ProcessingResult> {
    let mut records = split_records(content).into_iter();
    let header = records.next().ok_or_else(|| Error::Csv {
        message: "input is empty".to_string(),
    })?;

    let columns: HashMap<String, usize> = header
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name, i))
        .collect();
    for required in [COLUMN_TITLE, COLUMN_AUTHOR] {
        if !columns.contains_key(required) {
            return Err(Error::Csv {
                message: format!("header is missing the {} column", required),
            });
        }
    }

    let mut result = ProcessingResult::default();
    for (i, cells) in records.enumerate() {
        let row_number = i + 2;
        result.stats.total_rows += 1;

        let row = Row { columns: &columns, cells: &cells };
        if row.is_empty() {
            result.stats.skipped_rows += 1;
            continue;
        }

        match validate_row(&row, today) {
            Ok((book, warning)) => {
                if let Some(warning) = warning {
                    tracing::warn!(row = row_number, "{}", warning);
                    result.warnings.push(format!("Row {}: {}", row_number, warning));
                    result.stats.warning_rows += 1;
                }
                result.books.push(book);
                result.stats.successful_rows += 1;
            }
            Err(message) => {
                tracing::warn!(row = row_number, error = %message, "rejected CSV row");
                result.errors.push(format!("Row {}: {}", row_number, message));
                result.stats.failed_rows += 1;
            }
        }
    }

    tracing::info!(
        total = result.stats.total_rows,
        imported = result.stats.successful_rows,
        failed = result.stats.failed_rows,
        skipped = result.stats.skipped_rows,
        "CSV import finished"
    );
    Ok(result)
}

fn validate_row(row: &Row, today: NaiveDate) -> std::result::Result<(Book, Option<String>), String> {
    let title = row.get(COLUMN_TITLE);
    let author = row.get(COLUMN_AUTHOR);
    if title.is_empty() {
        return Err("Title is required and cannot be empty".into());
    }
    if author.is_empty() {
        return Err("Author is required and cannot be empty".into());
    }
    if title.chars().count() > MAX_TITLE {
        return Err(format!("Title is too long (maximum {} characters)", MAX_TITLE));
    }
    if author.chars().count() > MAX_AUTHOR {
        return Err(format!("Author name is too long (maximum {} characters)", MAX_AUTHOR));
    }

    let date_finished = validate_date(row.get(COLUMN_DATE), today)?;
    let pages = validate_pages(row.get(COLUMN_PAGES))?;

    let genre = match row.get(COLUMN_GENRE) {
        "" => "Unknown",
        g if g.chars().count() > MAX_GENRE => {
            return Err(format!("Genre is too long (maximum {} characters)", MAX_GENRE));
        }
        g => g,
    };

    let cover_url = row.get(COLUMN_COVER);
    if cover_url.chars().count() > MAX_COVER {
        return Err(format!("Cover URL is too long (maximum {} characters)", MAX_COVER));
    }
    let warning = (!cover_url.is_empty()
        && !cover_url.starts_with("http://")
        && !cover_url.starts_with("https://"))
    .then(|| format!("Cover URL may not be a valid URL format: {}", cover_url));

    let mut book = Book::new(title, author, date_finished, genre, pages);
    book.cover_url = cover_url.to_string();
    Ok((book, warning))
}

fn validate_date(value: &str, today: NaiveDate) -> std::result::Result<DateTime<Utc>, String> {
    if value.is_empty() {
        return Err("Date Finished is required".into());
    }
    let date = parse_date(value)
        .ok_or("Invalid date format. Expected YYYY-MM-DD or an RFC 3339 timestamp")?;

    if date.date_naive() > today {
        return Err("Date Finished cannot be in the future".into());
    }
    if date.date_naive() < NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN) {
        return Err("Date Finished is too far in the past (before 1900)".into());
    }
    Ok(date)
}

fn validate_pages(value: &str) -> std::result::Result<u32, String> {
    if value.is_empty() {
        return Err("Pages is required".into());
    }
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    let pages: u64 = digits
        .parse()
        .map_err(|_| "Invalid pages format. Expected a positive number")?;

    if pages < 1 {
        return Err("Pages must be at least 1".into());
    }
    if pages > u64::from(MAX_PAGES) {
        return Err(format!("Pages count is unreasonably high (maximum {})", MAX_PAGES));
    }
    Ok(pages as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Title,Author,Date Finished,Genre,Pages,Cover URL\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn quoted_cells_keep_commas_and_escapes() {
        let records = split_records("a,\"b, c\",\"say \"\"hi\"\"\"\r\n\n x , y \n");
        assert_eq!(
            records,
            vec![
                vec!["a".to_string(), "b, c".to_string(), "say \"hi\"".to_string()],
                vec!["x".to_string(), "y".to_string()],
            ]
        );
    }

    #[test]
    fn quoted_newline_stays_in_cell() {
        let records = split_records("\"two\nlines\",z");
        assert_eq!(records, vec![vec!["two\nlines".to_string(), "z".to_string()]]);
    }

    #[test]
    fn valid_row_derives_year_and_month() {
        let csv = format!("{}Dune,Frank Herbert,2023-05-14,,412 pages,https://x/c.jpg\n", HEADER);
        let result = parse_csv(&csv, today()).unwrap();
        assert!(result.errors.is_empty());
        let book = &result.books[0];
        assert_eq!(book.genre, "Unknown");
        assert_eq!(book.pages, 412);
        assert_eq!((book.reading_year, book.reading_month), (2023, 5));
        assert!(!book.is_currently_reading);
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = format!(
            "{}\
             ,Nobody,2023-01-01,Fiction,100,\n\
             Later,Someone,2024-07-01,Fiction,100,\n\
             Ancient,Someone,1899-12-31,Fiction,100,\n\
             Huge,Someone,2023-01-01,Fiction,10001,\n\
             Zero,Someone,2023-01-01,Fiction,0,\n\
             ,,,,,\n\
             Fine,Someone,2023-01-01,Fiction,100,cover.jpg\n",
            HEADER
        );
        let result = parse_csv(&csv, today()).unwrap();

        assert_eq!(result.stats.total_rows, 7);
        assert_eq!(result.stats.failed_rows, 5);
        assert_eq!(result.stats.skipped_rows, 1);
        assert_eq!(result.stats.successful_rows, 1);
        assert_eq!(result.stats.warning_rows, 1);
        assert_eq!(result.errors[0], "Row 2: Title is required and cannot be empty");
        assert_eq!(result.errors[1], "Row 3: Date Finished cannot be in the future");
        assert!(result.errors[2].starts_with("Row 4: Date Finished is too far in the past"));
        assert!(result.errors[3].starts_with("Row 5: Pages count is unreasonably high"));
        assert_eq!(result.errors[4], "Row 6: Pages must be at least 1");
        assert!(result.warnings[0].starts_with("Row 8: Cover URL may not be"));
    }

    #[test]
    fn header_without_title_is_fatal() {
        let err = parse_csv("Name,Author\nx,y\n", today()).unwrap_err();
        assert!(matches!(err, Error::Csv { .. }));
    }
}
