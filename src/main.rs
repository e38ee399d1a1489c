//! shelfdex CLI: search, filter and summarize a reading log.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use shelfdex::core::config::Config;
use shelfdex::core::types::{Book, Complexity, ReadingLevel};
use shelfdex::ingest;
use shelfdex::query::{FilterCriteria, SortCriterion};
use shelfdex::search::QueryEngine;

#[derive(Parser)]
#[command(name = "shelfdex", version, about = "Query engine and statistics for a personal reading log")]
struct Cli {
    /// JSON file holding the book collection.
    #[arg(long, global = true)]
    books: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relevance-ranked free-text search.
    Search {
        /// Text to look for in titles, authors, genres, tags, themes and insights.
        query: String,

        /// Maximum number of hits (defaults to the configured limit).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Records matching every given constraint, optionally sorted.
    Filter {
        #[arg(long = "genre")]
        genres: Vec<String>,

        #[arg(long = "author")]
        authors: Vec<String>,

        /// Beginner, Intermediate or Advanced.
        #[arg(long = "level")]
        levels: Vec<ReadingLevel>,

        /// Simple, Moderate or Complex.
        #[arg(long = "complexity")]
        complexities: Vec<Complexity>,

        #[arg(long = "year")]
        years: Vec<i32>,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long = "theme")]
        themes: Vec<String>,

        #[arg(long)]
        min_pages: Option<u32>,

        #[arg(long)]
        max_pages: Option<u32>,

        /// Sort key as `field` or `field:asc|desc`; repeat for tie-breakers.
        #[arg(long = "sort")]
        sort: Vec<SortCriterion>,
    },

    /// Aggregate reading statistics.
    Stats,

    /// Validate and clean a CSV export, then write it as a JSON collection.
    Import {
        /// CSV file with Title, Author, Date Finished, Genre, Pages and Cover URL columns.
        csv: PathBuf,

        /// Where to write the collection; printed to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Search { query, limit } => {
            let engine = open_engine(cli.books.as_deref(), config)?;
            let limit = limit.unwrap_or(engine.config().engine.default_search_limit);
            print_json(&engine.search(&query, limit))?;
        }

        Commands::Filter {
            genres,
            authors,
            levels,
            complexities,
            years,
            tags,
            themes,
            min_pages,
            max_pages,
            sort,
        } => {
            let engine = open_engine(cli.books.as_deref(), config)?;
            let criteria = FilterCriteria {
                genres,
                authors,
                reading_levels: levels,
                complexities,
                years,
                tags,
                themes,
                min_pages,
                max_pages,
            };
            let matched = engine.filter(&criteria);
            let books = if sort.is_empty() {
                matched
            } else {
                engine.sort(&matched, &sort)
            };
            print_json(&books)?;
        }

        Commands::Stats => {
            let engine = open_engine(cli.books.as_deref(), config)?;
            print_json(&engine.stats())?;
        }

        Commands::Import { csv, output } => {
            let result = ingest::import_csv(&csv, Utc::now().date_naive())?;
            for error in &result.errors {
                tracing::error!("{}", error);
            }
            tracing::info!(
                imported = result.stats.successful_rows,
                failed = result.stats.failed_rows,
                skipped = result.stats.skipped_rows,
                warnings = result.warnings.len(),
                "import complete"
            );

            match output {
                Some(path) => ingest::save_books(&path, &result.books)?,
                None => print_json(&result.books)?,
            }
        }
    }

    Ok(())
}

fn open_engine(books: Option<&Path>, config: Config) -> Result<QueryEngine> {
    let books: Vec<Book> = match books {
        Some(path) => ingest::load_books(path)?,
        None => {
            tracing::warn!("no --books file given, starting with an empty collection");
            Vec::new()
        }
    };
    Ok(QueryEngine::with_config(books, config))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}
