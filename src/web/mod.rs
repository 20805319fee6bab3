//! HTML controllers and routing
//!
//! One module per entity, each exposing the uniform route group
//! `{list, create, detail, update, delete}`. Handlers render askama
//! templates or redirect; repository failures bubble up as `AppError`.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod home;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard
        .route("/", get(home::index))
        // Authors
        .route("/author", get(authors::list))
        .route(
            "/author/create",
            get(authors::create_form).post(authors::create),
        )
        .route("/author/:id", get(authors::detail))
        .route(
            "/author/:id/update",
            get(authors::update_form).post(authors::update),
        )
        .route(
            "/author/:id/delete",
            get(authors::delete_form).post(authors::delete),
        )
        // Books
        .route("/book", get(books::list))
        .route("/book/create", get(books::create_form).post(books::create))
        .route("/book/:id", get(books::detail))
        .route(
            "/book/:id/update",
            get(books::update_form).post(books::update),
        )
        .route(
            "/book/:id/delete",
            get(books::delete_form).post(books::delete),
        )
        // Book instances
        .route("/bookInstance", get(book_instances::list))
        .route(
            "/bookInstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/bookInstance/:id", get(book_instances::detail))
        .route(
            "/bookInstance/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        )
        .route(
            "/bookInstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        )
        // Genres
        .route("/genre", get(genres::list))
        .route("/genre/create", get(genres::create_form).post(genres::create))
        .route("/genre/:id", get(genres::detail))
        .route(
            "/genre/:id/update",
            get(genres::update_form).post(genres::update),
        )
        .route(
            "/genre/:id/delete",
            get(genres::delete_form).post(genres::delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
