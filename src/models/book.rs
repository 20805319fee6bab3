//! Book model and related types

use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use super::{author::Author, genre::Genre};

/// Full book model from database. References are weak ids resolved by the
/// repository's population helpers at read time.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/book/{}", self.id)
    }
}

/// Book with its author reference populated
#[derive(Debug, Clone)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book with all references populated, for the detail page
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

/// Raw book form submission. A single checked genre checkbox arrives as one
/// scalar value; the form extractor collects it into a one-element sequence.
#[derive(Debug, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: Vec<i32>,
}

/// Trimmed book fields, ready for validation
#[derive(Debug, Validate)]
pub struct BookInput {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Title must be between 3 and 100 characters."
    ))]
    pub title: String,
    #[validate(length(
        min = 10,
        max = 1000,
        message = "Description must be between 10 and 1000 characters."
    ))]
    pub description: String,
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    pub author_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}

impl BookInput {
    pub fn sanitize(&self) -> NewBook {
        NewBook {
            title: crate::forms::escape_html(&self.title),
            description: crate::forms::escape_html(&self.description),
            isbn: crate::forms::escape_html(&self.isbn),
            author_id: self.author_id,
            genre_ids: self.genre_ids.clone(),
        }
    }
}

/// Sanitized book fields, as persisted
#[derive(Debug, Clone, Default)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub genre_ids: Vec<i32>,
}
