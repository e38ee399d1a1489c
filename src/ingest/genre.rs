/// Genre spellings and their canonical names, checked in this order
const GENRE_ALIASES: &[(&str, &str)] = &[
    ("fiction", "Fiction"),
    ("novel", "Fiction"),
    ("literary fiction", "Literary Fiction"),
    ("literary", "Literary Fiction"),
    ("sci-fi", "Science Fiction"),
    ("scifi", "Science Fiction"),
    ("science fiction", "Science Fiction"),
    ("sf", "Science Fiction"),
    ("fantasy", "Fantasy"),
    ("high fantasy", "Fantasy"),
    ("epic fantasy", "Fantasy"),
    ("mystery", "Mystery"),
    ("thriller", "Thriller"),
    ("suspense", "Thriller"),
    ("crime", "Crime"),
    ("detective", "Mystery"),
    ("romance", "Romance"),
    ("romantic", "Romance"),
    ("love story", "Romance"),
    ("non-fiction", "Non-Fiction"),
    ("nonfiction", "Non-Fiction"),
    ("non fiction", "Non-Fiction"),
    ("biography", "Biography"),
    ("memoir", "Memoir"),
    ("autobiography", "Biography"),
    ("bio", "Biography"),
    ("history", "History"),
    ("historical", "History"),
    ("hist", "History"),
    ("business", "Business"),
    ("self-help", "Self-Help"),
    ("self help", "Self-Help"),
    ("selfhelp", "Self-Help"),
    ("personal development", "Self-Help"),
    ("tech", "Technology"),
    ("technology", "Technology"),
    ("computer science", "Technology"),
    ("programming", "Technology"),
    ("software", "Technology"),
    ("philosophy", "Philosophy"),
    ("philosophical", "Philosophy"),
    ("phil", "Philosophy"),
    ("psychology", "Psychology"),
    ("psych", "Psychology"),
    ("mental health", "Psychology"),
    ("travel", "Travel"),
    ("travelogue", "Travel"),
    ("adventure", "Adventure"),
    ("poetry", "Poetry"),
    ("poem", "Poetry"),
    ("poems", "Poetry"),
    ("children", "Children's"),
    ("children's", "Children's"),
    ("young adult", "Young Adult"),
    ("ya", "Young Adult"),
    ("middle grade", "Children's"),
];

const GENRE_CATEGORIES: &[(&str, &str)] = &[
    ("Fiction", "Fiction"),
    ("Literary Fiction", "Fiction"),
    ("Science Fiction", "Science Fiction & Fantasy"),
    ("Fantasy", "Science Fiction & Fantasy"),
    ("Mystery", "Mystery & Thriller"),
    ("Thriller", "Mystery & Thriller"),
    ("Crime", "Mystery & Thriller"),
    ("Romance", "Romance"),
    ("Non-Fiction", "Non-Fiction"),
    ("Biography", "Biography & Memoir"),
    ("History", "History"),
    ("Business", "Business & Self-Help"),
    ("Self-Help", "Business & Self-Help"),
    ("Technology", "Technology & Science"),
    ("Philosophy", "Philosophy & Religion"),
    ("Psychology", "Psychology & Health"),
    ("Travel", "Travel & Adventure"),
    ("Poetry", "Poetry & Literature"),
    ("Children's", "Children & Young Adult"),
    ("Young Adult", "Children & Young Adult"),
];

const PAGE_ESTIMATES: &[(&str, u32)] = &[
    ("Fiction", 350),
    ("Literary Fiction", 400),
    ("Science Fiction", 380),
    ("Fantasy", 450),
    ("Mystery", 320),
    ("Thriller", 350),
    ("Romance", 300),
    ("Non-Fiction", 280),
    ("Biography", 400),
    ("Memoir", 350),
    ("History", 450),
    ("Business", 300),
    ("Self-Help", 250),
    ("Technology", 350),
    ("Philosophy", 400),
    ("Psychology", 350),
    ("Travel", 300),
    ("Poetry", 150),
    ("Children's", 200),
    ("Young Adult", 300),
];

pub const DEFAULT_PAGE_ESTIMATE: u32 = 350;

/// Title keywords hinting at a genre, checked in this order
const TITLE_HINTS: &[(&[&str], &str)] = &[
    (&["novel", "story", "tale"], "Fiction"),
    (&["space", "robot", "alien", "future", "planet", "star"], "Science Fiction"),
    (&["magic", "dragon", "wizard", "kingdom", "quest", "spell"], "Fantasy"),
    (&["murder", "detective", "crime", "mystery", "suspense", "thriller"], "Mystery"),
    (&["guide", "manual", "how to", "complete", "essential", "introduction"], "Non-Fiction"),
    (&["programming", "code", "software", "computer", "web", "app"], "Technology"),
    (&["business", "management", "strategy", "leadership", "marketing", "finance"], "Business"),
    (&["self-help", "personal", "success", "happiness", "mindfulness", "productivity"], "Self-Help"),
];

/// Canonical genre name.
///
/// Exact alias matches win, then the first alias that contains or is
/// contained in the input; anything else is returned title-cased.
pub fn standardize_genre(genre: &str) -> String {
    let trimmed = genre.trim().to_lowercase();
    if trimmed.is_empty() {
        return "Unknown".to_string();
    }

    if let Some((_, canonical)) = GENRE_ALIASES.iter().find(|(alias, _)| *alias == trimmed) {
        return canonical.to_string();
    }
    if let Some((_, canonical)) = GENRE_ALIASES
        .iter()
        .find(|(alias, _)| trimmed.contains(alias) || alias.contains(trimmed.as_str()))
    {
        return canonical.to_string();
    }

    trimmed
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// High-level shelf for a genre, "Other" when unmapped
pub fn genre_category(genre: &str) -> &'static str {
    let standardized = standardize_genre(genre);
    GENRE_CATEGORIES
        .iter()
        .find(|(name, _)| *name == standardized)
        .map_or("Other", |(_, category)| *category)
}

/// Guess from title keywords; "Fiction" when nothing matches
pub fn infer_genre_from_title(title: &str) -> &'static str {
    if title.is_empty() {
        return "Unknown";
    }
    let lower = title.to_lowercase();
    TITLE_HINTS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map_or("Fiction", |(_, genre)| *genre)
}

/// Typical page count for a genre
pub fn estimate_pages(genre: &str) -> u32 {
    let standardized = standardize_genre(genre);
    PAGE_ESTIMATES
        .iter()
        .find(|(name, _)| *name == standardized)
        .map_or(DEFAULT_PAGE_ESTIMATE, |(_, pages)| *pages)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
