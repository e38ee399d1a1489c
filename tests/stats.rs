//! Aggregate statistics over realistic reading logs.

use chrono::{NaiveDate, TimeZone, Utc};

use shelfdex::core::config::StatsConfig;
use shelfdex::core::types::{Book, Complexity, ReadingLevel};
use shelfdex::stats::{compute_stats, compute_stats_at, compute_stats_with, BookStats};

fn finished(title: &str, author: &str, genre: &str, pages: u32, (y, m, d): (i32, u32, u32)) -> Book {
    Book::new(title, author, Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(), genre, pages)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn reading_log() -> Vec<Book> {
    let mut dune = finished("Dune", "Frank Herbert", "Science Fiction", 600, (2023, 11, 2));
    dune.reading_level = Some(ReadingLevel::Advanced);
    dune.complexity = Some(Complexity::Complex);
    dune.themes = vec!["power".into(), "ecology".into()];
    dune.tags = vec!["classic".into()];
    dune.reading_time = Some("20 hours".into());
    dune.book_category = Some("Classics".into());

    let mut messiah = finished("Dune Messiah", "Frank Herbert", "Science Fiction", 300, (2024, 1, 15));
    messiah.reading_level = Some(ReadingLevel::Intermediate);
    messiah.complexity = Some(Complexity::Moderate);
    messiah.themes = vec!["power".into()];
    messiah.tags = vec!["sequel".into(), "classic".into()];
    messiah.reading_time = Some("10 hours".into());

    let mut habits = finished("Atomic Habits", "James Clear", "Self-Help", 300, (2024, 3, 1));
    habits.reading_level = Some(ReadingLevel::Beginner);
    habits.themes = vec!["habits".into()];
    habits.reading_time = Some("about a weekend".into());
    habits.target_audience = Some("General".into());

    let mut sapiens = finished("Sapiens", "Yuval Noah Harari", "History", 450, (2024, 3, 20));
    sapiens.reading_level = Some(ReadingLevel::Advanced);
    sapiens.reading_time = Some("2-3 hours".into());

    vec![dune, messiah, habits, sapiens]
}

#[test]
fn empty_collection_yields_zeroed_stats() {
    let stats = compute_stats(&[]);
    assert_eq!(stats, BookStats::empty());
    assert_eq!(stats.total_books, 0);
    assert_eq!(stats.total_pages, 0);
    assert!(stats.top_themes.is_empty());
    assert!(stats.most_read_authors.is_empty());
    assert_eq!(stats.average_reading_time, "Unknown");
    assert_eq!(stats.reading_efficiency.average_completion_time, "Unknown");

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["totalBooks"], 0);
    assert_eq!(json["topThemes"], serde_json::json!([]));
}

#[test]
fn totals_and_year_count() {
    let stats = compute_stats_at(&reading_log(), today());
    assert_eq!(stats.total_books, 4);
    assert_eq!(stats.total_pages, 1650);
    assert_eq!(stats.average_pages_per_book, 413);
    assert_eq!(stats.books_this_year, 3);
}

#[test]
fn distributions_skip_absent_values() {
    let stats = compute_stats_at(&reading_log(), today());

    assert_eq!(stats.genre_distribution["Science Fiction"], 2);
    assert_eq!(stats.genre_distribution.len(), 3);
    assert_eq!(stats.reading_level_distribution["Advanced"], 2);
    assert_eq!(stats.complexity_distribution.len(), 2);
    assert_eq!(stats.target_audience_distribution.len(), 1);
    assert_eq!(stats.book_category_distribution["Classics"], 1);

    assert_eq!(stats.reading_timeline[&2023], 1);
    assert_eq!(stats.reading_timeline[&2024], 3);
    assert_eq!(stats.monthly_reading_pattern[&3], 2);
}

#[test]
fn reading_time_ignores_unparseable_values() {
    // 20 + 10 + 3 hours over three parseable records
    let stats = compute_stats_at(&reading_log(), today());
    assert_eq!(stats.average_reading_time, "11 hours");
    assert_eq!(stats.total_reading_time, "1 days");
}

#[test]
fn top_lists_break_ties_by_first_appearance() {
    let stats = compute_stats_at(&reading_log(), today());

    let themes: Vec<(&str, usize)> = stats
        .top_themes
        .iter()
        .map(|t| (t.theme.as_str(), t.count))
        .collect();
    assert_eq!(themes, vec![("power", 2), ("ecology", 1), ("habits", 1)]);

    let tags: Vec<&str> = stats.top_tags.iter().map(|t| t.tag.as_str()).collect();
    assert_eq!(tags, vec!["classic", "sequel"]);

    assert_eq!(stats.most_read_authors[0].author, "Frank Herbert");
    assert_eq!(stats.most_read_authors[0].count, 2);
    assert_eq!(stats.most_read_authors[1].author, "James Clear");
}

#[test]
fn configured_limits_truncate_top_lists() {
    let config = StatsConfig {
        top_themes: 1,
        top_authors: 1,
        ..StatsConfig::default()
    };
    let stats = compute_stats_with(&reading_log(), today(), &config);
    assert_eq!(stats.top_themes.len(), 1);
    assert_eq!(stats.most_read_authors.len(), 1);
}

#[test]
fn efficiency_over_finish_span() {
    // 2023-11-02 .. 2024-03-20 is 139 days
    let stats = compute_stats_at(&reading_log(), today());
    let eff = &stats.reading_efficiency;
    assert_eq!(eff.pages_per_day, 11.87);
    assert_eq!(eff.books_per_month, 0.86);
    assert_eq!(eff.average_completion_time, "46 days");
}

#[test]
fn suggestions_step_up_from_recent_level() {
    // recent window: Sapiens(Adv), Habits(Beg), Messiah(Int), Dune(Adv) -> Advanced
    let stats = compute_stats_at(&reading_log(), today());
    let picks: Vec<&str> = stats.suggested_next_reads.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(picks, vec!["Sapiens", "Dune"]);
}

#[test]
fn currently_reading_overrides_suggestions() {
    let mut books = reading_log();
    books[2].is_currently_reading = true;
    let stats = compute_stats_at(&books, today());
    assert_eq!(stats.suggested_next_reads.len(), 1);
    assert_eq!(stats.suggested_next_reads[0].title, "Atomic Habits");
}

#[test]
fn similar_books_grouped_by_genre_category_and_theme() {
    let stats = compute_stats_at(&reading_log(), today());
    let power: Vec<&str> = stats.similar_books["power"].iter().map(|b| b.title.as_str()).collect();
    assert_eq!(power, vec!["Dune", "Dune Messiah"]);
    assert_eq!(stats.similar_books["Classics"].len(), 1);
    assert_eq!(stats.similar_books["History"][0].title, "Sapiens");
}

#[test]
fn huge_reading_times_do_not_overflow() {
    let mut books = reading_log();
    books[2].reading_time = Some("18000000000000000000 hours".into());
    books[3].reading_time = Some("18000000000000000000 hours".into());
    let stats = compute_stats_at(&books, today());
    assert!(stats.total_reading_time.ends_with(" days"));
    assert!(stats.average_reading_time.ends_with(" days"));
}
