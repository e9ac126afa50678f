pub mod handler;
pub mod pagination;
pub mod search;
pub mod types;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use handler::pagination::PaginationError;
use search::SearchError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchApiError {
    #[error("{0}")]
    InvalidParam(String),

    #[error("{0}")]
    InvalidPage(String),

    #[error(transparent)]
    SearchError(#[from] SearchError),

    #[error("{0}")]
    CustomError(String),
}

impl From<PaginationError<SearchError>> for SearchApiError {
    fn from(err: PaginationError<SearchError>) -> Self {
        match err {
            PaginationError::Search(e) => SearchApiError::SearchError(e),
            e => SearchApiError::InvalidPage(e.to_string()),
        }
    }
}

impl actix_web::error::ResponseError for SearchApiError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            SearchApiError::InvalidPage(detail) => json!({ "detail": detail }),
            SearchApiError::SearchError(_) | SearchApiError::CustomError(_) => {
                tracing::error!("API error: {:?}", self);
                json!({ "error": self.to_string() })
            }
            e => json!({ "error": e.to_string() }),
        };

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            SearchApiError::InvalidParam(_) => StatusCode::BAD_REQUEST,
            SearchApiError::InvalidPage(_) => StatusCode::NOT_FOUND,
            SearchApiError::SearchError(SearchError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            SearchApiError::SearchError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SearchApiError::CustomError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
