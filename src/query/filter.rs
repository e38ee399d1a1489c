use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};

use crate::core::types::{Book, Complexity, ReadingLevel};
use crate::index::{BookIndex, IndexKey};

/// Multi-field filter.
///
/// Values inside one field are OR-ed, fields are AND-ed. An empty list or a
/// `None` bound leaves that field unconstrained.
///
/// Reading levels and complexities are typed, so deserializing criteria that
/// name an unknown level or complexity fails instead of matching nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub genres: Vec<String>,
    pub authors: Vec<String>,
    pub reading_levels: Vec<ReadingLevel>,
    pub complexities: Vec<Complexity>,
    pub years: Vec<i32>,
    pub tags: Vec<String>,
    pub themes: Vec<String>,
    pub min_pages: Option<u32>, // inclusive
    pub max_pages: Option<u32>, // inclusive
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn reading_levels(mut self, levels: impl IntoIterator<Item = ReadingLevel>) -> Self {
        self.reading_levels = levels.into_iter().collect();
        self
    }

    pub fn complexities(mut self, complexities: impl IntoIterator<Item = Complexity>) -> Self {
        self.complexities = complexities.into_iter().collect();
        self
    }

    pub fn years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years = years.into_iter().collect();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn themes<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.themes = themes.into_iter().map(Into::into).collect();
        self
    }

    pub fn min_pages(mut self, pages: u32) -> Self {
        self.min_pages = Some(pages);
        self
    }

    pub fn max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
            && self.authors.is_empty()
            && self.reading_levels.is_empty()
            && self.complexities.is_empty()
            && self.years.is_empty()
            && self.tags.is_empty()
            && self.themes.is_empty()
            && self.min_pages.is_none()
            && self.max_pages.is_none()
    }

    /// Positions of every record satisfying the criteria.
    ///
    /// Starts from the whole collection and intersects with the index union
    /// of each active field, then applies the page bounds.
    pub fn matching_ids(&self, index: &BookIndex, books: &[Book]) -> RoaringBitmap {
        let mut ids = index.all();

        narrow(&mut ids, index, self.genres.iter().map(|g| IndexKey::Genre(g)));
        narrow(&mut ids, index, self.authors.iter().map(|a| IndexKey::Author(a)));
        narrow(&mut ids, index, self.reading_levels.iter().map(|l| IndexKey::ReadingLevel(*l)));
        narrow(&mut ids, index, self.complexities.iter().map(|c| IndexKey::Complexity(*c)));
        narrow(&mut ids, index, self.years.iter().map(|y| IndexKey::Year(*y)));
        narrow(&mut ids, index, self.tags.iter().map(|t| IndexKey::Tag(t)));
        narrow(&mut ids, index, self.themes.iter().map(|t| IndexKey::Theme(t)));

        if self.min_pages.is_some() || self.max_pages.is_some() {
            let min = self.min_pages.unwrap_or(0);
            let max = self.max_pages.unwrap_or(u32::MAX);
            ids = ids
                .iter()
                .filter(|&id| {
                    books
                        .get(id as usize)
                        .is_some_and(|book| book.pages >= min && book.pages <= max)
                })
                .collect();
        }

        ids
    }
}

fn narrow<'a, I>(ids: &mut RoaringBitmap, index: &BookIndex, keys: I)
where
    I: ExactSizeIterator<Item = IndexKey<'a>>,
{
    if keys.len() == 0 {
        return;
    }
    *ids &= index.union(keys);
}
