//! Genre model and related types

use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// Full genre model from database
#[derive(Debug, Clone, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/genre/{}", self.id)
    }
}

/// Raw genre form submission
#[derive(Debug, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

/// Trimmed genre fields, ready for validation
#[derive(Debug, Validate)]
pub struct GenreInput {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Genre name must be between 3 and 100 characters."
    ))]
    pub name: String,
}

impl GenreInput {
    pub fn sanitize(&self) -> NewGenre {
        NewGenre {
            name: crate::forms::escape_html(&self.name),
        }
    }
}

/// Sanitized genre fields, as persisted
#[derive(Debug, Clone, Default)]
pub struct NewGenre {
    pub name: String,
}
