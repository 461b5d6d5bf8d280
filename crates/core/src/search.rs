//! Movie search input handling.
//!
//! Search is a case-insensitive "contains" match (`ILIKE '%fragment%'`) over
//! the movie title and/or the names of the movie's actors.

use crate::error::{CoreError, FieldError};

/// Maximum accepted length of a single search fragment.
pub const MAX_FRAGMENT_LENGTH: usize = 150;

/// Escape `LIKE` metacharacters so the fragment matches literally.
///
/// PostgreSQL's default `LIKE` escape character is the backslash.
pub fn escape_like(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build an `ILIKE` "contains" pattern, or `None` for blank input.
pub fn contains_pattern(fragment: &str) -> Option<String> {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("%{}%", escape_like(trimmed)))
    }
}

/// Resolved `ILIKE` patterns for a movie search. At least one is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSearch {
    pub title_pattern: Option<String>,
    pub actor_pattern: Option<String>,
}

impl MovieSearch {
    /// Build from raw `title` / `actor` query parameters.
    ///
    /// Blank fragments are ignored; if nothing usable remains the request is
    /// rejected rather than silently listing the whole catalog.
    pub fn parse(title: Option<&str>, actor: Option<&str>) -> Result<Self, CoreError> {
        let mut errors = Vec::new();
        for (field, value) in [("title", title), ("actor", actor)] {
            if value.is_some_and(|v| v.trim().chars().count() > MAX_FRAGMENT_LENGTH) {
                errors.push(FieldError::new(
                    field,
                    format!("{field} must be at most {MAX_FRAGMENT_LENGTH} characters"),
                ));
            }
        }
        if !errors.is_empty() {
            return Err(CoreError::InvalidFields(errors));
        }

        let title_pattern = title.and_then(contains_pattern);
        let actor_pattern = actor.and_then(contains_pattern);

        if title_pattern.is_none() && actor_pattern.is_none() {
            return Err(CoreError::InvalidFields(vec![FieldError::new(
                "title",
                "at least one of title or actor must be provided",
            )]));
        }

        Ok(Self {
            title_pattern,
            actor_pattern,
        })
    }
}
