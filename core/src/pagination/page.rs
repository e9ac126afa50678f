use serde::Serialize;

use super::num_pages;

/// One materialized page of a result set.
///
/// The page keeps a snapshot of the total `count` it was cut from, so the
/// navigation helpers work without going back to the paginator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    number: u64,
    per_page: u64,
    count: u64,
    num_pages: u64,
}

impl<T> Page<T> {
    pub fn new(
        items: Vec<T>,
        number: u64,
        per_page: u64,
        count: u64,
        allow_empty_first_page: bool,
    ) -> Self {
        Self {
            items,
            number,
            per_page,
            count,
            num_pages: num_pages(count, per_page, allow_empty_first_page),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// 1-based page number.
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Total number of items across all pages.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn num_pages(&self) -> u64 {
        self.num_pages
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_other_pages(&self) -> bool {
        self.has_previous() || self.has_next()
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    /// 1-based index of the first item on this page, 0 when there are no
    /// results at all.
    pub fn start_index(&self) -> u64 {
        if self.count == 0 {
            return 0;
        }
        self.per_page * (self.number - 1) + 1
    }

    /// 1-based index of the last item on this page.
    pub fn end_index(&self) -> u64 {
        if self.number == self.num_pages {
            return self.count;
        }
        self.number * self.per_page
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            per_page: self.per_page,
            count: self.count,
            num_pages: self.num_pages,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
