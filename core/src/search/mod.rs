pub mod memory;

pub use memory::{MemoryIndex, MemoryQuery, Searchable};

use serde::Serialize;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(
        "Result window is too large, from + size must be less than or equal to: [{max}] but was [{}]",
        .from + .size
    )]
    ResultWindowExceeded { from: u64, size: u64, max: u64 },

    #[error("Search backend unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of one query execution: the hits inside the requested window and
/// the total number of documents the query matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHits<T> {
    pub hits: Vec<T>,
    pub total: u64,
}

impl<T> SearchHits<T> {
    pub fn new(hits: Vec<T>, total: u64) -> Self {
        Self { hits, total }
    }

    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            total: 0,
        }
    }
}

/// A search that reports its hit total with every execution.
#[cfg_attr(test, mockall::automock(type Hit = String; type Error = SearchError;))]
pub trait SearchQuery {
    type Hit;
    type Error;

    /// Runs the search for the half-open `window` of positions.
    fn execute(&self, window: Range<u64>) -> Result<SearchHits<Self::Hit>, Self::Error>;
}

/// A listing that can only tell its size through a separate count.
#[cfg_attr(test, mockall::automock(type Item = String; type Error = SearchError;))]
pub trait CountedQuery {
    type Item;
    type Error;

    fn count(&self) -> Result<u64, Self::Error>;

    fn fetch(&self, window: Range<u64>) -> Result<Vec<Self::Item>, Self::Error>;
}
