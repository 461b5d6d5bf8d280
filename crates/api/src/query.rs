//! Shared query parameter types for API handlers.
//!
//! Numeric parameters are taken as raw strings and parsed by `cinema_core` so
//! that a bad `limit` produces a field-level 400 rather than axum's
//! plain-text query rejection.

use cinema_core::error::CoreError;
use cinema_core::listing::{MovieSort, Pagination};
use cinema_core::search::MovieSearch;
use serde::Deserialize;

/// Required pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PaginationParams {
    pub fn resolve(&self) -> Result<Pagination, CoreError> {
        Pagination::parse(self.limit.as_deref(), self.offset.as_deref())
    }
}

/// `GET /api/movies` parameters: pagination plus sort.
///
/// `sortBy` accepts `title`, `release_date` or `rating`; `order` accepts
/// `asc` or `desc`. Anything else falls back to rating descending.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    #[serde(flatten)]
    pub page: PaginationParams,
    #[serde(rename = "sortBy", alias = "sort_by")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl MovieListParams {
    pub fn sort(&self) -> MovieSort {
        MovieSort::parse(self.sort_by.as_deref(), self.order.as_deref())
    }
}

/// `GET /api/movies/search` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MovieSearchParams {
    #[serde(flatten)]
    pub page: PaginationParams,
    pub title: Option<String>,
    pub actor: Option<String>,
}

impl MovieSearchParams {
    pub fn search(&self) -> Result<MovieSearch, CoreError> {
        MovieSearch::parse(self.title.as_deref(), self.actor.as_deref())
    }
}
