//! Dashboard endpoint

use askama::Template;
use axum::extract::State;

use crate::{error::AppResult, models::CopyStatus, AppState};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    title: &'static str,
    book_count: i64,
    book_instance_count: i64,
    available_count: i64,
    author_count: i64,
    genre_count: i64,
}

/// Home page with collection totals. The five counts are independent
/// reads, issued concurrently and joined before rendering.
pub async fn index(State(state): State<AppState>) -> AppResult<IndexPage> {
    let repo = &state.repository;
    let (book_count, book_instance_count, available_count, author_count, genre_count) = tokio::try_join!(
        repo.books.count(),
        repo.book_instances.count(),
        repo.book_instances.count_by_status(CopyStatus::Available),
        repo.authors.count(),
        repo.genres.count(),
    )?;

    Ok(IndexPage {
        title: "Home",
        book_count,
        book_instance_count,
        available_count,
        author_count,
        genre_count,
    })
}
