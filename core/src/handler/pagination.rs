use crate::pagination::{
    CountPaginator, Page, PageError, Paginate, PaginatorConfig, SearchPaginator,
};
use crate::search::{CountedQuery, SearchQuery};
use crate::types::handlers::pagination::PaginatedResult;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaginationError<E> {
    #[error("Invalid page \"{page}\": {message}.")]
    InvalidPage { page: String, message: String },

    #[error(transparent)]
    Search(E),
}

/// Page-number pagination driven by `?page=` and `?page_size=` query
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageNumberPagination {
    pub page_size: u64,
    pub max_page_size: u64,
    pub page_query_param: String,
    pub page_size_query_param: String,
    #[serde(flatten)]
    pub paginator: PaginatorConfig,
}

impl Default for PageNumberPagination {
    fn default() -> Self {
        Self {
            page_size: 25,
            max_page_size: 50,
            page_query_param: "page".to_string(),
            page_size_query_param: "page_size".to_string(),
            paginator: PaginatorConfig::default(),
        }
    }
}

impl PageNumberPagination {
    /// The requested page size capped at `max_page_size`, or the default when
    /// the parameter is missing, not a number or not positive.
    pub fn page_size(&self, params: &HashMap<String, String>) -> u64 {
        params
            .get(&self.page_size_query_param)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|size| *size > 0)
            .map(|size| size.min(self.max_page_size))
            .unwrap_or(self.page_size)
    }

    pub fn page_number<'a>(&self, params: &'a HashMap<String, String>) -> &'a str {
        params
            .get(&self.page_query_param)
            .map(String::as_str)
            .unwrap_or("1")
    }

    pub fn paginate<P>(
        &self,
        paginator: &mut P,
        params: &HashMap<String, String>,
    ) -> Result<Page<P::Item>, PaginationError<P::Error>>
    where
        P: Paginate,
        P::Error: std::error::Error,
    {
        let number = self.page_number(params);
        paginator.page(number).map_err(|err| match err {
            PageError::Search(e) => PaginationError::Search(e),
            err => PaginationError::InvalidPage {
                page: number.to_string(),
                message: err.to_string(),
            },
        })
    }

    /// Paginates a search with a [`SearchPaginator`] sized from `params`.
    pub fn paginate_search<Q>(
        &self,
        query: Q,
        params: &HashMap<String, String>,
    ) -> Result<Page<Q::Hit>, PaginationError<Q::Error>>
    where
        Q: SearchQuery,
        Q::Error: std::error::Error,
    {
        let per_page = self.page_size(params);
        let mut paginator = SearchPaginator::with_config(query, per_page, self.paginator);
        self.paginate(&mut paginator, params)
    }

    /// Paginates a plain listing with a [`CountPaginator`] sized from
    /// `params`. The listing is counted before anything is fetched.
    pub fn paginate_listing<Q>(
        &self,
        query: Q,
        params: &HashMap<String, String>,
    ) -> Result<Page<Q::Item>, PaginationError<Q::Error>>
    where
        Q: CountedQuery,
        Q::Error: std::error::Error,
    {
        let per_page = self.page_size(params);
        let mut paginator = CountPaginator::new(query, per_page)
            .allow_empty_first_page(self.paginator.allow_empty_first_page);
        self.paginate(&mut paginator, params)
    }

    pub fn paginated_response<T>(&self, page: Page<T>, url: &Url) -> PaginatedResult<T> {
        let next = page
            .next_page_number()
            .map(|number| replace_query_param(url, &self.page_query_param, &number.to_string()));
        let previous = page.previous_page_number().map(|number| {
            if number == 1 {
                remove_query_param(url, &self.page_query_param)
            } else {
                replace_query_param(url, &self.page_query_param, &number.to_string())
            }
        });
        let count = page.count();

        PaginatedResult::new(page.into_items(), count, next, previous)
    }
}

fn query_pairs_without(url: &Url, key: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    pairs.sort();
    pairs
}

fn with_query_pairs(url: &Url, pairs: Vec<(String, String)>) -> String {
    let mut url = url.clone();
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    url.to_string()
}

/// `url` with `key` set to `value`; query parameters come out sorted.
pub fn replace_query_param(url: &Url, key: &str, value: &str) -> String {
    let mut pairs = query_pairs_without(url, key);
    pairs.push((key.to_string(), value.to_string()));
    pairs.sort();
    with_query_pairs(url, pairs)
}

pub fn remove_query_param(url: &Url, key: &str) -> String {
    with_query_pairs(url, query_pairs_without(url, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::CountPaginator;
    use crate::search::{MockCountedQuery, MockSearchQuery, SearchError, SearchHits};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_page_size_is_capped_and_defaulted() {
        let pagination = PageNumberPagination::default();

        assert_eq!(pagination.page_size(&params(&[])), 25);
        assert_eq!(pagination.page_size(&params(&[("page_size", "10")])), 10);
        assert_eq!(pagination.page_size(&params(&[("page_size", "500")])), 50);
        assert_eq!(pagination.page_size(&params(&[("page_size", "0")])), 25);
        assert_eq!(pagination.page_size(&params(&[("page_size", "-2")])), 25);
        assert_eq!(pagination.page_size(&params(&[("page_size", "ten")])), 25);
    }

    #[test]
    fn test_page_number_defaults_to_first_page() {
        let pagination = PageNumberPagination::default();

        assert_eq!(pagination.page_number(&params(&[])), "1");
        assert_eq!(pagination.page_number(&params(&[("page", "4")])), "4");
    }

    #[test]
    fn test_paginate_search_uses_requested_size() {
        let mut query = MockSearchQuery::new();
        query
            .expect_execute()
            .withf(|window| *window == (20..30))
            .times(1)
            .returning(|_| Ok(SearchHits::new(vec!["x".to_string(); 10], 95)));

        let pagination = PageNumberPagination::default();
        let page = pagination
            .paginate_search(query, &params(&[("page", "3"), ("page_size", "10")]))
            .unwrap();

        assert_eq!(page.number(), 3);
        assert_eq!(page.num_pages(), 10);
    }

    #[test]
    fn test_paginate_reports_invalid_page() {
        let mut query = MockSearchQuery::new();
        query.expect_execute().never();

        let pagination = PageNumberPagination::default();
        let err = pagination
            .paginate_search(query, &params(&[("page", "lol")]))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid page \"lol\": That page number is not an integer."
        );
    }

    #[test]
    fn test_paginate_passes_search_errors_through() {
        let mut query = MockSearchQuery::new();
        query
            .expect_execute()
            .returning(|_| Err(SearchError::Unavailable("down".to_string())));

        let pagination = PageNumberPagination::default();
        let err = pagination.paginate_search(query, &params(&[])).unwrap_err();

        assert!(matches!(
            err,
            PaginationError::Search(SearchError::Unavailable(_))
        ));
    }

    #[test]
    fn test_paginate_works_with_count_paginator() {
        let mut query = MockCountedQuery::new();
        query.expect_count().returning(|| Ok(3));
        query.expect_fetch().never();

        let pagination = PageNumberPagination::default();
        let mut paginator = CountPaginator::new(query, 2);
        let err = pagination
            .paginate(&mut paginator, &params(&[("page", "9")]))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid page \"9\": That page contains no results."
        );
    }

    #[test]
    fn test_paginate_listing_counts_then_fetches() {
        let mut query = MockCountedQuery::new();
        query.expect_count().times(1).returning(|| Ok(12));
        query
            .expect_fetch()
            .withf(|window| *window == (10..12))
            .times(1)
            .returning(|_| Ok(vec!["k".to_string(), "l".to_string()]));

        let pagination = PageNumberPagination::default();
        let page = pagination
            .paginate_listing(query, &params(&[("page", "3"), ("page_size", "5")]))
            .unwrap();

        assert_eq!(page.number(), 3);
        assert_eq!(page.count(), 12);
        assert!(!page.has_next());
    }

    #[test]
    fn test_links_on_middle_page() {
        let pagination = PageNumberPagination::default();
        let page = Page::new(vec![1, 2], 2, 2, 6, true);

        let result = pagination.paginated_response(
            page,
            &url("https://addons.example.com/v1/addons/search/?q=tab&page=2&page_size=2"),
        );

        assert_eq!(result.count, 6);
        assert_eq!(result.results, vec![1, 2]);
        assert_eq!(
            result.next.as_deref(),
            Some("https://addons.example.com/v1/addons/search/?page=3&page_size=2&q=tab")
        );
        assert_eq!(
            result.previous.as_deref(),
            Some("https://addons.example.com/v1/addons/search/?page_size=2&q=tab")
        );
    }

    #[test]
    fn test_links_on_single_page() {
        let pagination = PageNumberPagination::default();
        let page = Page::new(vec!["only"], 1, 25, 1, true);

        let result =
            pagination.paginated_response(page, &url("http://localhost/v1/addons/search/"));

        assert_eq!(result.next, None);
        assert_eq!(result.previous, None);
    }

    #[test]
    fn test_previous_link_drops_empty_query() {
        let pagination = PageNumberPagination::default();
        let page = Page::new(vec![3], 2, 2, 3, true);

        let result =
            pagination.paginated_response(page, &url("http://localhost/v1/addons/search/?page=2"));

        assert_eq!(result.next, None);
        assert_eq!(
            result.previous.as_deref(),
            Some("http://localhost/v1/addons/search/")
        );
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let pagination: PageNumberPagination =
            serde_json::from_value(serde_json::json!({ "max_page_size": 100, "result_window": 10000 }))
                .unwrap();

        assert_eq!(pagination.page_size, 25);
        assert_eq!(pagination.max_page_size, 100);
        assert_eq!(pagination.paginator.result_window, 10_000);
        assert!(pagination.paginator.allow_empty_first_page);
    }
}
