//! Author model and related types

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Detail page URL derived from the storage-assigned identifier
    pub fn url(&self) -> String {
        format!("/author/{}", self.id)
    }

    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Raw author form submission, exactly as posted by the browser
#[derive(Debug, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

/// Trimmed author fields, ready for validation
#[derive(Debug, Validate)]
pub struct AuthorInput {
    #[validate(length(
        min = 3,
        max = 100,
        message = "First name must be between 3 and 100 characters."
    ))]
    pub first_name: String,
    #[validate(length(
        min = 3,
        max = 100,
        message = "Last name must be between 3 and 100 characters."
    ))]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorInput {
    /// Escape the text fields for storage and re-display
    pub fn sanitize(&self) -> NewAuthor {
        NewAuthor {
            first_name: crate::forms::escape_html(&self.first_name),
            last_name: crate::forms::escape_html(&self.last_name),
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Sanitized author fields, as persisted
#[derive(Debug, Clone, Default)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}
