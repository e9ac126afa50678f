use thiserror::Error;

pub const LESS_THAN_ONE: &str = "That page number is less than 1";
pub const NO_RESULTS: &str = "That page contains no results";

/// Failure to resolve a page.
///
/// `NotAnInteger`, `EmptyPage` and `InvalidPage` are raised by the paginator
/// itself. `Search` carries whatever the backing query produced, untouched.
#[derive(Error, Debug)]
pub enum PageError<E> {
    #[error("That page number is not an integer")]
    NotAnInteger,

    #[error("{0}")]
    EmptyPage(&'static str),

    #[error("That page number is too high for the current page size")]
    InvalidPage,

    #[error(transparent)]
    Search(E),
}

impl<E> PageError<E> {
    /// True for every kind the paginator raises on its own (i.e. everything
    /// except a failed query execution).
    pub fn is_invalid_page(&self) -> bool {
        !matches!(self, PageError::Search(_))
    }

    pub fn into_search_error(self) -> Option<E> {
        match self {
            PageError::Search(e) => Some(e),
            _ => None,
        }
    }
}
