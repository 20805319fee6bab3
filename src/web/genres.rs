//! Genre endpoints

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use validator::Validate;

use crate::{
    error::AppResult,
    forms,
    models::{genre::GenreForm, Book, Genre, GenreInput, NewGenre},
    AppState,
};

#[derive(Template)]
#[template(path = "genre_list.html")]
pub struct GenreListPage {
    title: &'static str,
    genres: Vec<Genre>,
}

/// List of all genres, sorted by name
pub async fn list(State(state): State<AppState>) -> AppResult<GenreListPage> {
    let genres = state.repository.genres.list().await?;
    Ok(GenreListPage {
        title: "Genres",
        genres,
    })
}

#[derive(Template)]
#[template(path = "genre_detail.html")]
pub struct GenreDetailPage {
    genre: Option<Genre>,
    books: Vec<Book>,
}

/// Detail page for a specific genre and the books carrying it. The genre
/// document comes out of the first book's populated genre list in the
/// common case; a genre with no books needs the direct by-id fallback.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<GenreDetailPage> {
    let repo = &state.repository;
    let books = repo.books.list_by_genre(id).await?;
    let genre = match books.first() {
        Some(book) => repo
            .books
            .populate_genres(&book.genre_ids)
            .await?
            .into_iter()
            .find(|g| g.id == id),
        None => repo.genres.find_by_id(id).await?,
    };
    Ok(GenreDetailPage { genre, books })
}

#[derive(Template)]
#[template(path = "genre_form.html")]
pub struct GenreFormPage {
    title: &'static str,
    genre: NewGenre,
    errors: Vec<String>,
}

/// Empty genre create form
pub async fn create_form() -> GenreFormPage {
    GenreFormPage {
        title: "Create Genre",
        genre: NewGenre::default(),
        errors: Vec::new(),
    }
}

/// Handle genre create. A genre with the same name already existing
/// redirects to it instead of creating a duplicate; uniqueness is checked
/// here, not enforced by the schema.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let input = GenreInput {
        name: form.name.trim().to_string(),
    };
    if let Err(e) = input.validate() {
        errors.extend(forms::validation_messages(&e));
    }
    let genre = input.sanitize();

    if !errors.is_empty() {
        return Ok(GenreFormPage {
            title: "Create Genre",
            genre,
            errors,
        }
        .into_response());
    }

    if let Some(existing) = state.repository.genres.find_by_name(&genre.name).await? {
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    let id = state.repository.genres.insert(&genre).await?;
    Ok(Redirect::to(&format!("/genre/{}", id)).into_response())
}

/// Genre update form, pre-filled from the stored document
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(genre) = state.repository.genres.find_by_id(id).await? else {
        return Ok(Redirect::to("/genre").into_response());
    };
    Ok(GenreFormPage {
        title: "Update Genre",
        genre: NewGenre { name: genre.name },
        errors: Vec::new(),
    }
    .into_response())
}

/// Handle genre update: overwrite the mutable fields in place
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let input = GenreInput {
        name: form.name.trim().to_string(),
    };
    if let Err(e) = input.validate() {
        errors.extend(forms::validation_messages(&e));
    }
    let genre = input.sanitize();

    if !errors.is_empty() {
        return Ok(GenreFormPage {
            title: "Update Genre",
            genre,
            errors,
        }
        .into_response());
    }

    state.repository.genres.update(id, &genre).await?;
    Ok(Redirect::to(&format!("/genre/{}", id)).into_response())
}

#[derive(Template)]
#[template(path = "genre_delete.html")]
pub struct GenreDeletePage {
    title: &'static str,
    genre: Genre,
    books: Vec<Book>,
}

/// Delete confirmation, listing the books that still reference the genre
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(genre) = state.repository.genres.find_by_id(id).await? else {
        return Ok(Redirect::to("/genre").into_response());
    };
    let books = state.repository.books.list_by_genre(id).await?;
    Ok(GenreDeletePage {
        title: "Delete Genre",
        genre,
        books,
    }
    .into_response())
}

/// Handle genre delete. As with authors, the dependent-books guard is
/// advisory only and the delete is unconditional.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Redirect> {
    state.repository.genres.delete(id).await?;
    Ok(Redirect::to("/genre"))
}
