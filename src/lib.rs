//! Lectern Library Catalog
//!
//! A Rust implementation of the Lectern library catalog, a server-rendered
//! HTML web application for browsing and managing authors, books, book
//! copies and genres.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod repository;
pub mod web;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: Arc<repository::Repository>,
}
