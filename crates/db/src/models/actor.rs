//! Actor entity model and DTOs.

use cinema_core::types::{Date, DbId, Timestamp};
use cinema_core::validation::{validate_gender, validate_not_blank};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::movie::Movie;

/// A row from the `actors` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    /// One of `male`, `female`, `other`.
    pub gender: String,
    pub date_of_birth: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An actor with every movie they appear in.
#[derive(Debug, Clone, Serialize)]
pub struct ActorWithMovies {
    #[serde(flatten)]
    pub actor: Actor,
    pub movies: Vec<Movie>,
}

/// DTO for creating an actor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActor {
    #[validate(
        length(min = 1, max = 100, message = "name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
    pub date_of_birth: Date,
}

/// DTO for updating an actor. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateActor {
    #[validate(
        length(min = 1, max = 100, message = "name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
}
