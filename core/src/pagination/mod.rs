pub mod counted;
pub mod error;
pub mod page;
pub mod search;

pub use counted::CountPaginator;
pub use error::PageError;
pub use page::Page;
pub use search::SearchPaginator;

use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// Deepest position the search backend will serve. Should match the
/// `max_result_window` setting of the index being queried.
pub const DEFAULT_RESULT_WINDOW: u64 = 25_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatorConfig {
    pub result_window: u64,
    /// When set, page 1 is valid even if the query matched nothing.
    pub allow_empty_first_page: bool,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            result_window: DEFAULT_RESULT_WINDOW,
            allow_empty_first_page: true,
        }
    }
}

/// A page number as it arrives from a caller: already an integer, or raw
/// text from a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber<'a> {
    Int(i64),
    Raw(&'a str),
}

impl From<i64> for PageNumber<'_> {
    fn from(number: i64) -> Self {
        PageNumber::Int(number)
    }
}

impl From<i32> for PageNumber<'_> {
    fn from(number: i32) -> Self {
        PageNumber::Int(number.into())
    }
}

impl From<u32> for PageNumber<'_> {
    fn from(number: u32) -> Self {
        PageNumber::Int(number.into())
    }
}

impl From<u64> for PageNumber<'_> {
    fn from(number: u64) -> Self {
        PageNumber::Int(i64::try_from(number).unwrap_or(i64::MAX))
    }
}

impl From<usize> for PageNumber<'_> {
    fn from(number: usize) -> Self {
        PageNumber::Int(i64::try_from(number).unwrap_or(i64::MAX))
    }
}

impl<'a> From<&'a str> for PageNumber<'a> {
    fn from(raw: &'a str) -> Self {
        PageNumber::Raw(raw)
    }
}

impl<'a> From<&'a String> for PageNumber<'a> {
    fn from(raw: &'a String) -> Self {
        PageNumber::Raw(raw.as_str())
    }
}

/// Checks that `number` is an integer of at least 1. No upper bound is
/// applied here.
pub fn validate_number<E>(number: PageNumber<'_>) -> Result<u64, PageError<E>> {
    let number = match number {
        PageNumber::Int(n) => n,
        PageNumber::Raw(raw) => match raw.trim().parse::<i64>() {
            Ok(n) => n,
            // Well-formed integers wider than i64 are still integers
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => return Err(PageError::NotAnInteger),
            },
        },
    };

    if number < 1 {
        return Err(PageError::EmptyPage(error::LESS_THAN_ONE));
    }

    Ok(number as u64)
}

/// Number of pages for `count` items. Orphans are not supported, so the
/// last page may hold a single item.
pub fn num_pages(count: u64, per_page: u64, allow_empty_first_page: bool) -> u64 {
    if count == 0 && !allow_empty_first_page {
        return 0;
    }
    count.max(1).div_ceil(per_page.max(1))
}

/// Common surface of the paginators, used by the HTTP pagination layer.
pub trait Paginate {
    type Item;
    type Error;

    fn per_page(&self) -> u64;

    fn page<'a>(
        &mut self,
        number: impl Into<PageNumber<'a>>,
    ) -> Result<Page<Self::Item>, PageError<Self::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    type Result = std::result::Result<u64, PageError<std::convert::Infallible>>;

    #[test]
    fn test_validate_number_accepts_integers_and_text() {
        let from_int: Result = validate_number(3i64.into());
        let from_text: Result = validate_number(" 12 ".into());
        let signed: Result = validate_number("+2".into());

        assert_eq!(from_int.unwrap(), 3);
        assert_eq!(from_text.unwrap(), 12);
        assert_eq!(signed.unwrap(), 2);
    }

    #[test]
    fn test_validate_number_rejects_garbage() {
        for raw in ["lol", "", "1.5", "2.0", "1e3"] {
            let result: Result = validate_number(raw.into());
            assert!(
                matches!(result, Err(PageError::NotAnInteger)),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_validate_number_rejects_less_than_one() {
        let zero: Result = validate_number(0i64.into());
        let negative: Result = validate_number("-4".into());

        assert!(matches!(zero, Err(PageError::EmptyPage(msg)) if msg == error::LESS_THAN_ONE));
        assert!(matches!(negative, Err(PageError::EmptyPage(_))));
    }

    #[test]
    fn test_validate_number_has_no_upper_bound() {
        let huge: Result = validate_number(u64::MAX.into());
        assert_eq!(huge.unwrap(), i64::MAX as u64);
    }

    #[test]
    fn test_validate_number_clamps_overflowing_text() {
        let huge: Result = validate_number("99999999999999999999".into());
        let huge_negative: Result = validate_number("-99999999999999999999".into());

        assert_eq!(huge.unwrap(), i64::MAX as u64);
        assert!(
            matches!(huge_negative, Err(PageError::EmptyPage(msg)) if msg == error::LESS_THAN_ONE)
        );
    }

    #[test]
    fn test_num_pages() {
        assert_eq!(num_pages(0, 5, true), 1);
        assert_eq!(num_pages(0, 5, false), 0);
        assert_eq!(num_pages(1, 5, false), 1);
        assert_eq!(num_pages(5, 5, true), 1);
        assert_eq!(num_pages(6, 5, true), 2);
        assert_eq!(num_pages(666, 5, true), 134);
    }
}
