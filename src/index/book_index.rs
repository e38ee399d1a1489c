use std::collections::HashMap;
use std::time::Instant;

use roaring::RoaringBitmap;

use crate::core::types::{Book, Complexity, ReadingLevel};

/// Position of a record in the collection the index was built from
pub type BookId = u32;

/// One bucket of a secondary index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKey<'a> {
    Author(&'a str),
    Genre(&'a str),
    Tag(&'a str),
    Theme(&'a str),
    ReadingLevel(ReadingLevel),
    Complexity(Complexity),
    Year(i32),
    Month(u32),
}

/// Secondary indexes over one version of the collection.
///
/// Buckets are bitmaps of collection positions, so iterating a bucket yields
/// records in their original order. The index is never patched: a changed
/// collection gets a freshly built index.
#[derive(Debug, Clone, Default)]
pub struct BookIndex {
    pub by_title: HashMap<String, BookId>, // lower-cased title, last write wins
    pub by_author: HashMap<String, RoaringBitmap>,
    pub by_genre: HashMap<String, RoaringBitmap>,
    pub by_tag: HashMap<String, RoaringBitmap>,
    pub by_theme: HashMap<String, RoaringBitmap>,
    pub by_reading_level: HashMap<ReadingLevel, RoaringBitmap>,
    pub by_complexity: HashMap<Complexity, RoaringBitmap>,
    pub by_year: HashMap<i32, RoaringBitmap>,
    pub by_month: HashMap<u32, RoaringBitmap>,
    pub doc_count: u32,
}

impl BookIndex {
    pub fn build(books: &[Book]) -> Self {
        let start = Instant::now();
        let mut index = BookIndex::default();

        for (id, book) in (0..).zip(books) {
            index.add_book(id, book);
        }

        tracing::debug!(
            books = books.len(),
            authors = index.by_author.len(),
            tags = index.by_tag.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "book index built"
        );
        index
    }

    fn add_book(&mut self, id: BookId, book: &Book) {
        self.by_title.insert(book.title.to_lowercase(), id);

        insert(&mut self.by_author, book.author.clone(), id);
        insert(&mut self.by_genre, book.genre.clone(), id);

        for tag in &book.tags {
            insert(&mut self.by_tag, tag.clone(), id);
        }
        for theme in &book.themes {
            insert(&mut self.by_theme, theme.clone(), id);
        }

        if let Some(level) = book.reading_level {
            insert(&mut self.by_reading_level, level, id);
        }
        if let Some(complexity) = book.complexity {
            insert(&mut self.by_complexity, complexity, id);
        }

        insert(&mut self.by_year, book.reading_year, id);
        insert(&mut self.by_month, book.reading_month, id);

        self.doc_count += 1;
    }

    pub fn bucket(&self, key: IndexKey<'_>) -> Option<&RoaringBitmap> {
        match key {
            IndexKey::Author(author) => self.by_author.get(author),
            IndexKey::Genre(genre) => self.by_genre.get(genre),
            IndexKey::Tag(tag) => self.by_tag.get(tag),
            IndexKey::Theme(theme) => self.by_theme.get(theme),
            IndexKey::ReadingLevel(level) => self.by_reading_level.get(&level),
            IndexKey::Complexity(complexity) => self.by_complexity.get(&complexity),
            IndexKey::Year(year) => self.by_year.get(&year),
            IndexKey::Month(month) => self.by_month.get(&month),
        }
    }

    /// Case-insensitive exact title lookup
    pub fn title(&self, title: &str) -> Option<BookId> {
        self.by_title.get(&title.to_lowercase()).copied()
    }

    /// Union of the buckets for every key; unknown keys contribute nothing
    pub fn union<'a, I>(&self, keys: I) -> RoaringBitmap
    where
        I: IntoIterator<Item = IndexKey<'a>>,
    {
        let mut result = RoaringBitmap::new();
        for key in keys {
            if let Some(bucket) = self.bucket(key) {
                result |= bucket;
            }
        }
        result
    }

    /// Every position in the collection
    pub fn all(&self) -> RoaringBitmap {
        let mut all = RoaringBitmap::new();
        all.insert_range(0..self.doc_count);
        all
    }

    pub fn len(&self) -> usize {
        self.doc_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.doc_count == 0
    }
}

fn insert<K>(map: &mut HashMap<K, RoaringBitmap>, key: K, id: BookId)
where
    K: std::hash::Hash + Eq,
{
    map.entry(key).or_default().insert(id);
}
