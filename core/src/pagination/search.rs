use super::error::NO_RESULTS;
use super::{num_pages, validate_number, Page, PageError, PageNumber, Paginate, PaginatorConfig};
use crate::search::SearchQuery;

/// Paginator for search results.
///
/// A count-based paginator runs a count and then a bounded fetch. Search
/// executions already report how many documents matched, so this paginator
/// fetches the requested slice straight away and takes the count from the
/// response. One execution per page, and the upper bound of the page number
/// is only checked once that count is known.
pub struct SearchPaginator<Q> {
    query: Q,
    per_page: u64,
    config: PaginatorConfig,
    count: Option<u64>,
}

impl<Q: SearchQuery> SearchPaginator<Q> {
    pub fn new(query: Q, per_page: u64) -> Self {
        Self::with_config(query, per_page, PaginatorConfig::default())
    }

    /// A `per_page` of 0 is treated as 1.
    pub fn with_config(query: Q, per_page: u64, config: PaginatorConfig) -> Self {
        Self {
            query,
            per_page: per_page.max(1),
            config,
            count: None,
        }
    }

    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Hit total reported by the latest execution.
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    pub fn num_pages(&self) -> Option<u64> {
        self.count
            .map(|count| num_pages(count, self.per_page, self.config.allow_empty_first_page))
    }

    /// Checks the page number is an integer of at least 1. The upper bound
    /// depends on a count that is not known yet, so it is left to `page`.
    pub fn validate_number<'a>(
        &self,
        number: impl Into<PageNumber<'a>>,
    ) -> Result<u64, PageError<Q::Error>> {
        validate_number(number.into())
    }

    pub fn page<'a>(
        &mut self,
        number: impl Into<PageNumber<'a>>,
    ) -> Result<Page<Q::Hit>, PageError<Q::Error>> {
        let number = self.validate_number(number)?;
        let bottom = (number - 1).saturating_mul(self.per_page);
        let top = bottom.saturating_add(self.per_page);

        // The first item of the page (position bottom + 1) has to be inside
        // the window. Where the page ends is the engine's business.
        if bottom >= self.config.result_window {
            tracing::debug!(
                number,
                bottom,
                result_window = self.config.result_window,
                "Rejected page past the result window"
            );
            return Err(PageError::InvalidPage);
        }

        let result = self.query.execute(bottom..top).map_err(PageError::Search)?;
        self.count = Some(result.total);

        let page = Page::new(
            result.hits,
            number,
            self.per_page,
            result.total,
            self.config.allow_empty_first_page,
        );

        tracing::debug!(
            number,
            per_page = self.per_page,
            total = result.total,
            "Resolved search page"
        );

        if number > page.num_pages() && !(number == 1 && self.config.allow_empty_first_page) {
            return Err(PageError::EmptyPage(NO_RESULTS));
        }

        Ok(page)
    }
}

impl<Q: SearchQuery> Paginate for SearchPaginator<Q> {
    type Item = Q::Hit;
    type Error = Q::Error;

    fn per_page(&self) -> u64 {
        self.per_page
    }

    fn page<'a>(
        &mut self,
        number: impl Into<PageNumber<'a>>,
    ) -> Result<Page<Self::Item>, PageError<Self::Error>> {
        SearchPaginator::page(self, number)
    }
}
