use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from loading, importing and configuring a book collection.
///
/// Querying and statistics never fail; only the file-facing edges do.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(shelfdex::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid book collection JSON: {0}")]
    #[diagnostic(
        code(shelfdex::json),
        help("The collection must be a JSON array of book records with camelCase field names.")
    )]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    #[diagnostic(
        code(shelfdex::config),
        help("See the [engine] and [stats] tables for the accepted keys.")
    )]
    Config(#[from] toml::de::Error),

    #[error("CSV import failed: {message}")]
    #[diagnostic(
        code(shelfdex::csv),
        help("The first line must be a header naming Title, Author, Date Finished, Genre, Pages and Cover URL.")
    )]
    Csv { message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
