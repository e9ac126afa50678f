use crate::handler::pagination::PageNumberPagination;
use crate::search::{MemoryIndex, MemoryQuery};
use crate::types::addon::{Addon, AddonSort, AddonType};
use crate::SearchApiError;
use actix_web::{web, HttpRequest, HttpResponse};
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;

pub type AddonIndex = MemoryIndex<Addon>;

#[derive(Debug, Default, Deserialize)]
pub struct SearchAddonsQueryParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub addon_type: Option<String>,
    pub sort: Option<String>,
}

/// Query parameters of the plain catalog listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListAddonsQueryParams {
    #[serde(rename = "type")]
    pub addon_type: Option<String>,
    pub sort: Option<String>,
}

/// Builds the index query for a search request.
pub fn build_query(
    index: &AddonIndex,
    params: &SearchAddonsQueryParams,
) -> Result<MemoryQuery<Addon>, SearchApiError> {
    let sort = match params.sort.as_deref() {
        Some(raw) => raw.parse::<AddonSort>().map_err(SearchApiError::InvalidParam)?,
        None => AddonSort::default(),
    };

    let mut query = index
        .query()
        .sort_by(move |a: &Addon, b: &Addon| sort.compare(a, b));

    if let Some(text) = params.q.as_deref() {
        query = query.matching(text);
    }

    if let Some(raw) = params.addon_type.as_deref() {
        let addon_type = raw
            .parse::<AddonType>()
            .map_err(SearchApiError::InvalidParam)?;
        query = query.filter(move |addon: &Addon| addon.addon_type == addon_type);
    }

    Ok(query)
}

fn request_url(req: &HttpRequest) -> Result<Url, SearchApiError> {
    let info = req.connection_info();
    let raw = format!("{}://{}{}", info.scheme(), info.host(), req.uri());
    Url::parse(&raw).map_err(|e| SearchApiError::CustomError(format!("Invalid request url: {e}")))
}

fn query_params(req: &HttpRequest) -> Result<HashMap<String, String>, SearchApiError> {
    web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(|q| q.into_inner())
        .map_err(|e| SearchApiError::InvalidParam(format!("Invalid query string: {e}")))
}

/// GET /v1/addons/search/
pub async fn search_addons(
    req: HttpRequest,
    query: web::Query<SearchAddonsQueryParams>,
    index: web::Data<AddonIndex>,
    pagination: web::Data<PageNumberPagination>,
) -> Result<HttpResponse, SearchApiError> {
    let search = build_query(&index, &query)?;

    let params = query_params(&req)?;

    let page = pagination.paginate_search(search, &params)?;

    tracing::debug!(
        q = query.q.as_deref().unwrap_or_default(),
        page = page.number(),
        count = page.count(),
        "Add-on search"
    );

    let url = request_url(&req)?;
    Ok(HttpResponse::Ok().json(pagination.paginated_response(page, &url)))
}

/// GET /v1/addons/
///
/// Browsing without search terms goes through the count-based paginator.
pub async fn list_addons(
    req: HttpRequest,
    query: web::Query<ListAddonsQueryParams>,
    index: web::Data<AddonIndex>,
    pagination: web::Data<PageNumberPagination>,
) -> Result<HttpResponse, SearchApiError> {
    let query = query.into_inner();
    let listing = build_query(
        &index,
        &SearchAddonsQueryParams {
            q: None,
            addon_type: query.addon_type,
            sort: query.sort,
        },
    )?;

    let params = query_params(&req)?;
    let page = pagination.paginate_listing(listing, &params)?;

    let url = request_url(&req)?;
    Ok(HttpResponse::Ok().json(pagination.paginated_response(page, &url)))
}
