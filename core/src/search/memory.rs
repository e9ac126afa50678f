use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;

use super::{CountedQuery, SearchError, SearchHits, SearchQuery};

/// Documents that can be matched against a lowercase search term.
pub trait Searchable {
    fn matches(&self, term: &str) -> bool;
}

type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Read-only document store searched in process.
#[derive(Debug)]
pub struct MemoryIndex<T> {
    documents: Arc<Vec<T>>,
    max_result_window: Option<u64>,
}

impl<T> Clone for MemoryIndex<T> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            max_result_window: self.max_result_window,
        }
    }
}

impl<T> MemoryIndex<T> {
    pub fn new(documents: Vec<T>) -> Self {
        Self {
            documents: Arc::new(documents),
            max_result_window: None,
        }
    }

    /// Rejects executions whose window ends past `max`, like a search
    /// cluster configured with `index.max_result_window`.
    pub fn with_max_result_window(mut self, max: u64) -> Self {
        self.max_result_window = Some(max);
        self
    }

    pub fn max_result_window(&self) -> Option<u64> {
        self.max_result_window
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn query(&self) -> MemoryQuery<T> {
        MemoryQuery {
            index: self.clone(),
            terms: Vec::new(),
            filters: Vec::new(),
            sort: None,
        }
    }
}

/// A query over a [`MemoryIndex`]. Every term and every filter must match.
pub struct MemoryQuery<T> {
    index: MemoryIndex<T>,
    terms: Vec<String>,
    filters: Vec<Filter<T>>,
    sort: Option<Comparator<T>>,
}

impl<T> MemoryQuery<T> {
    /// Adds the whitespace-separated words of `text` as required terms.
    pub fn matching(mut self, text: &str) -> Self {
        self.terms
            .extend(text.split_whitespace().map(|term| term.to_lowercase()));
        self
    }

    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Orders matches with `compare`. Without a comparator, index order is
    /// kept.
    pub fn sort_by<F>(mut self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.sort = Some(Box::new(compare));
        self
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn check_window(&self, window: &Range<u64>) -> Result<(), SearchError> {
        match self.index.max_result_window {
            Some(max) if window.end > max => Err(SearchError::ResultWindowExceeded {
                from: window.start,
                size: window.end.saturating_sub(window.start),
                max,
            }),
            _ => Ok(()),
        }
    }
}

impl<T: Searchable> MemoryQuery<T> {
    fn matched(&self) -> Vec<&T> {
        let mut matched: Vec<&T> = self
            .index
            .documents
            .iter()
            .filter(|doc| self.terms.iter().all(|term| doc.matches(term)))
            .filter(|doc| self.filters.iter().all(|predicate| predicate(doc)))
            .collect();

        if let Some(compare) = &self.sort {
            matched.sort_by(|a, b| compare(a, b));
        }

        matched
    }
}

fn window_bounds(window: &Range<u64>) -> (usize, usize) {
    let start = usize::try_from(window.start).unwrap_or(usize::MAX);
    let size = usize::try_from(window.end.saturating_sub(window.start)).unwrap_or(usize::MAX);
    (start, size)
}

impl<T: Searchable + Clone> SearchQuery for MemoryQuery<T> {
    type Hit = T;
    type Error = SearchError;

    fn execute(&self, window: Range<u64>) -> Result<SearchHits<T>, SearchError> {
        self.check_window(&window)?;

        let matched = self.matched();
        let total = matched.len() as u64;
        let (start, size) = window_bounds(&window);
        let hits: Vec<T> = matched.into_iter().skip(start).take(size).cloned().collect();

        tracing::debug!(
            from = window.start,
            size = window.end.saturating_sub(window.start),
            total,
            returned = hits.len(),
            "Executed in-memory search"
        );

        Ok(SearchHits::new(hits, total))
    }
}

impl<T: Searchable + Clone> CountedQuery for MemoryQuery<T> {
    type Item = T;
    type Error = SearchError;

    fn count(&self) -> Result<u64, SearchError> {
        let count = self.matched().len() as u64;
        tracing::debug!(count, "Counted in-memory matches");
        Ok(count)
    }

    fn fetch(&self, window: Range<u64>) -> Result<Vec<T>, SearchError> {
        self.check_window(&window)?;

        let (start, size) = window_bounds(&window);
        Ok(self
            .matched()
            .into_iter()
            .skip(start)
            .take(size)
            .cloned()
            .collect())
    }
}
