//! Pagination and sorting rules for list endpoints.
//!
//! Query-string values arrive as raw strings so that malformed input is
//! reported through [`CoreError::InvalidFields`] instead of a framework
//! rejection with a different response shape.

use crate::error::{CoreError, FieldError};

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Hard upper bound on `limit`. Larger values are clamped, not rejected.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A validated `limit`/`offset` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// Parse the required `limit` (> 0) and `offset` (>= 0) query parameters.
    ///
    /// Every problem is collected so the client sees both fields at once.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, CoreError> {
        let mut errors = Vec::new();

        let limit = match limit.map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                errors.push(FieldError::new("limit", "limit is required"));
                None
            }
            Some(raw) => match raw.parse::<i64>() {
                Ok(v) if v > 0 => Some(v.min(MAX_PAGE_LIMIT)),
                _ => {
                    errors.push(FieldError::new(
                        "limit",
                        "limit must be a positive integer",
                    ));
                    None
                }
            },
        };

        let offset = match offset.map(str::trim).filter(|s| !s.is_empty()) {
            None => {
                errors.push(FieldError::new("offset", "offset is required"));
                None
            }
            Some(raw) => match raw.parse::<i64>() {
                Ok(v) if v >= 0 => Some(v),
                _ => {
                    errors.push(FieldError::new(
                        "offset",
                        "offset must be a non-negative integer",
                    ));
                    None
                }
            },
        };

        match (limit, offset) {
            (Some(limit), Some(offset)) => Ok(Self { limit, offset }),
            _ => Err(CoreError::InvalidFields(errors)),
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns a movie listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieSortField {
    Title,
    ReleaseDate,
    #[default]
    Rating,
}

impl MovieSortField {
    /// Parse a `sortBy` value. Unknown or absent values fall back to [`Self::Rating`].
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("title") => Self::Title,
            Some("release_date" | "releasedate" | "release-date") => Self::ReleaseDate,
            Some("rating") => Self::Rating,
            _ => Self::default(),
        }
    }

    /// The SQL column name. Only ever one of the allow-listed literals.
    pub fn column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::ReleaseDate => "release_date",
            Self::Rating => "rating",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse an `order` value. Unknown or absent values fall back to [`Self::Desc`].
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc" | "ascending") => Self::Asc,
            Some("desc" | "descending") => Self::Desc,
            _ => Self::default(),
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A resolved movie ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovieSort {
    pub field: MovieSortField,
    pub order: SortOrder,
}

impl MovieSort {
    pub fn parse(sort_by: Option<&str>, order: Option<&str>) -> Self {
        Self {
            field: MovieSortField::parse_or_default(sort_by),
            order: SortOrder::parse_or_default(order),
        }
    }

    /// `ORDER BY` body. The trailing `id` tiebreaker keeps pages disjoint.
    pub fn order_by_clause(self) -> String {
        format!("{} {}, id ASC", self.field.column(), self.order.sql())
    }
}
