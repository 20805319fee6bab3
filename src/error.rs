//! Error types for the Lectern server
//!
//! Validation failures and not-found lookups are handled locally in the
//! handlers (form re-render, redirect to the list page); only repository
//! and connectivity failures reach `AppError`, which renders the generic
//! error page.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Database(e) = &self;
        tracing::error!("Database error: {:?}", e);

        let page = ErrorPage {
            message: "A database error occurred".to_string(),
        };
        match page.render() {
            Ok(body) => (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
