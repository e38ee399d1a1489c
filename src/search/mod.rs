pub mod executor;
pub mod results;

pub use executor::{QueryEngine, Snapshot};
pub use results::SearchResult;
