pub mod cache;
pub mod filter;
pub mod sort;

pub use cache::{CacheKey, SearchCache};
pub use filter::FilterCriteria;
pub use sort::{SortCriterion, SortField, SortOrder};
