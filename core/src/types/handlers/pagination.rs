use serde::Serialize;

/// Response envelope of a page-number paginated listing.
#[derive(Debug, Serialize)]
pub struct PaginatedResult<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn new(
        results: Vec<T>,
        count: u64,
        next: Option<String>,
        previous: Option<String>,
    ) -> Self {
        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
