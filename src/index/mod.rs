pub mod book_index;

pub use book_index::{BookId, BookIndex, IndexKey};
