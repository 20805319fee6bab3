//! Author endpoints

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
    models::{author::AuthorForm, Author, AuthorInput, Book, NewAuthor},
    AppState,
};

#[derive(Template)]
#[template(path = "author_list.html")]
pub struct AuthorListPage {
    title: &'static str,
    authors: Vec<Author>,
}

/// List of all authors, sorted by last name
pub async fn list(State(state): State<AppState>) -> AppResult<AuthorListPage> {
    let authors = state.repository.authors.list().await?;
    Ok(AuthorListPage {
        title: "Author List",
        authors,
    })
}

#[derive(Template)]
#[template(path = "author_detail.html")]
pub struct AuthorDetailPage {
    author: Option<Author>,
    books: Vec<Book>,
}

/// Details about a specific author and the books written by them.
/// The author is populated back from the book query to avoid a second
/// round trip; an author with no books needs the direct by-id fallback.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<AuthorDetailPage> {
    let repo = &state.repository;
    let books = repo.books.list_by_author(id).await?;
    let author = match books.first() {
        Some(book) => repo.authors.populate(book.author_id).await?,
        None => repo.authors.find_by_id(id).await?,
    };
    Ok(AuthorDetailPage { author, books })
}

#[derive(Template)]
#[template(path = "author_form.html")]
pub struct AuthorFormPage {
    title: &'static str,
    author: NewAuthor,
    errors: Vec<String>,
}

/// Empty author create form
pub async fn create_form() -> AuthorFormPage {
    AuthorFormPage {
        title: "Create Author",
        author: NewAuthor::default(),
        errors: Vec::new(),
    }
}

fn parse_input(form: &AuthorForm, errors: &mut Vec<String>) -> AuthorInput {
    AuthorInput {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        date_of_birth: forms::parse_optional_date(&form.date_of_birth, "Date of birth", errors),
        date_of_death: forms::parse_optional_date(&form.date_of_death, "Date of death", errors),
    }
}

/// Handle author create. A duplicate natural key (first + last name)
/// redirects to the existing author instead of creating a second document.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let input = parse_input(&form, &mut errors);
    if let Err(e) = input.validate() {
        errors.extend(forms::validation_messages(&e));
    }
    let author = input.sanitize();

    if !errors.is_empty() {
        // Render the form again with sanitized data
        return Ok(AuthorFormPage {
            title: "Create Author",
            author,
            errors,
        }
        .into_response());
    }

    if let Some(existing) = state
        .repository
        .authors
        .find_by_name(&author.first_name, &author.last_name)
        .await?
    {
        return Ok(Redirect::to(&existing.url()).into_response());
    }

    let id = state.repository.authors.insert(&author).await?;
    Ok(Redirect::to(&format!("/author/{}", id)).into_response())
}

/// Author update form, pre-filled from the stored document
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(author) = state.repository.authors.find_by_id(id).await? else {
        return Ok(Redirect::to("/author").into_response());
    };
    Ok(AuthorFormPage {
        title: "Update Author",
        author: NewAuthor {
            first_name: author.first_name,
            last_name: author.last_name,
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        },
        errors: Vec::new(),
    }
    .into_response())
}

/// Handle author update: overwrite the mutable fields in place
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let input = parse_input(&form, &mut errors);
    if let Err(e) = input.validate() {
        errors.extend(forms::validation_messages(&e));
    }
    let author = input.sanitize();

    if !errors.is_empty() {
        return Ok(AuthorFormPage {
            title: "Update Author",
            author,
            errors,
        }
        .into_response());
    }

    state.repository.authors.update(id, &author).await?;
    Ok(Redirect::to(&format!("/author/{}", id)).into_response())
}

#[derive(Template)]
#[template(path = "author_delete.html")]
pub struct AuthorDeletePage {
    title: &'static str,
    author: Author,
    books: Vec<Book>,
}

/// Delete confirmation, listing the books that still reference the author
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(author) = state.repository.authors.find_by_id(id).await? else {
        return Ok(Redirect::to("/author").into_response());
    };
    let books = state.repository.books.list_by_author(id).await?;
    Ok(AuthorDeletePage {
        title: "Delete Author",
        author,
        books,
    }
    .into_response())
}

/// Handle author delete. The dependent-books list shown on the
/// confirmation page is advisory only: the delete is not re-checked here
/// and can leave dangling author references on books.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Redirect> {
    state.repository.authors.delete(id).await?;
    Ok(Redirect::to("/author"))
}
