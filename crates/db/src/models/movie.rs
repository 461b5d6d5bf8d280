//! Movie entity model and DTOs.

use cinema_core::types::{Date, DbId, Timestamp};
use cinema_core::validation::validate_not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::actor::Actor;

/// A row from the `movies` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_date: Date,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A movie together with its cast, returned by `GET /api/movies/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct MovieWithActors {
    #[serde(flatten)]
    pub movie: Movie,
    pub actors: Vec<Actor>,
}

/// DTO for creating a movie, optionally seeding its cast.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(
        length(min = 1, max = 150, message = "title must be 1-150 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: String,
    pub release_date: Date,
    #[validate(range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10"))]
    pub rating: f64,
    /// Actors to associate in the same transaction as the insert.
    #[serde(default)]
    pub actor_ids: Vec<DbId>,
}

/// DTO for updating a movie. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMovie {
    #[validate(
        length(min = 1, max = 150, message = "title must be 1-150 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,
    pub release_date: Option<Date>,
    #[validate(range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10"))]
    pub rating: Option<f64>,
    /// When present, replaces the whole cast in the same transaction.
    pub actor_ids: Option<Vec<DbId>>,
}
