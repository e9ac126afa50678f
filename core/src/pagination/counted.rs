use super::error::NO_RESULTS;
use super::{num_pages, Page, PageError, PageNumber, Paginate};
use crate::search::CountedQuery;

/// Classic paginator: counts the listing once, then fetches bounded slices.
///
/// Used for listings that cannot report a total alongside their items.
pub struct CountPaginator<Q> {
    query: Q,
    per_page: u64,
    allow_empty_first_page: bool,
    count: Option<u64>,
}

impl<Q: CountedQuery> CountPaginator<Q> {
    /// A `per_page` of 0 is treated as 1.
    pub fn new(query: Q, per_page: u64) -> Self {
        Self {
            query,
            per_page: per_page.max(1),
            allow_empty_first_page: true,
            count: None,
        }
    }

    pub fn allow_empty_first_page(mut self, allow: bool) -> Self {
        self.allow_empty_first_page = allow;
        self
    }

    /// Total number of items. The count query runs on first use only.
    pub fn count(&mut self) -> Result<u64, Q::Error> {
        if let Some(count) = self.count {
            return Ok(count);
        }
        let count = self.query.count()?;
        self.count = Some(count);
        Ok(count)
    }

    pub fn num_pages(&mut self) -> Result<u64, Q::Error> {
        let count = self.count()?;
        Ok(num_pages(count, self.per_page, self.allow_empty_first_page))
    }

    pub fn validate_number<'a>(
        &mut self,
        number: impl Into<PageNumber<'a>>,
    ) -> Result<u64, PageError<Q::Error>> {
        let number = super::validate_number(number.into())?;
        let num_pages = self.num_pages().map_err(PageError::Search)?;

        if number > num_pages && !(number == 1 && self.allow_empty_first_page) {
            return Err(PageError::EmptyPage(NO_RESULTS));
        }

        Ok(number)
    }

    pub fn page<'a>(
        &mut self,
        number: impl Into<PageNumber<'a>>,
    ) -> Result<Page<Q::Item>, PageError<Q::Error>> {
        let number = self.validate_number(number)?;
        let count = self.count().map_err(PageError::Search)?;

        let bottom = (number - 1).saturating_mul(self.per_page);
        let top = bottom.saturating_add(self.per_page).min(count);

        let items = self
            .query
            .fetch(bottom..top.max(bottom))
            .map_err(PageError::Search)?;

        Ok(Page::new(
            items,
            number,
            self.per_page,
            count,
            self.allow_empty_first_page,
        ))
    }
}

impl<Q: CountedQuery> Paginate for CountPaginator<Q> {
    type Item = Q::Item;
    type Error = Q::Error;

    fn per_page(&self) -> u64 {
        self.per_page
    }

    fn page<'a>(
        &mut self,
        number: impl Into<PageNumber<'a>>,
    ) -> Result<Page<Self::Item>, PageError<Self::Error>> {
        CountPaginator::page(self, number)
    }
}
