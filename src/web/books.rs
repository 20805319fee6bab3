//! Book endpoints

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
    models::{
        book::BookForm, Author, Book, BookDetail, BookInput, BookInstance, BookWithAuthor, Genre,
        NewBook,
    },
    AppState,
};

#[derive(Template)]
#[template(path = "book_list.html")]
pub struct BookListPage {
    title: &'static str,
    books: Vec<BookWithAuthor>,
}

/// List of all books, sorted by title, with authors populated
pub async fn list(State(state): State<AppState>) -> AppResult<BookListPage> {
    let books = state.repository.books.list_with_authors().await?;
    Ok(BookListPage {
        title: "Book List",
        books,
    })
}

#[derive(Template)]
#[template(path = "book_detail.html")]
pub struct BookDetailPage {
    book: Option<BookDetail>,
    instances: Vec<BookInstance>,
}

/// Info about the current book and all its physical copies. The book is
/// reached through its instances in the common case; a book with no
/// instances must be read by id.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<BookDetailPage> {
    let repo = &state.repository;
    let instances = repo.book_instances.list_by_book(id).await?;
    let book = match instances.first().and_then(|instance| instance.book_id) {
        Some(book_id) => repo.books.find_detail(book_id).await?,
        None => repo.books.find_detail(id).await?,
    };
    Ok(BookDetailPage { book, instances })
}

#[derive(Template)]
#[template(path = "book_form.html")]
pub struct BookFormPage {
    title: &'static str,
    book: NewBook,
    authors: Vec<(Author, bool)>,
    genres: Vec<(Genre, bool)>,
    errors: Vec<String>,
}

impl BookFormPage {
    /// Mark the author and genres carried by the book as selected so a
    /// re-rendered form keeps the user's choices checked.
    fn new(
        title: &'static str,
        book: NewBook,
        authors: Vec<Author>,
        genres: Vec<Genre>,
        errors: Vec<String>,
    ) -> Self {
        let authors = authors
            .into_iter()
            .map(|a| {
                let selected = book.author_id == Some(a.id);
                (a, selected)
            })
            .collect();
        let genres = genres
            .into_iter()
            .map(|g| {
                let checked = book.genre_ids.contains(&g.id);
                (g, checked)
            })
            .collect();
        Self {
            title,
            book,
            authors,
            genres,
            errors,
        }
    }
}

/// Fetch the selectable reference lists for the book form. The two reads
/// are independent and issued concurrently.
async fn load_reference_lists(state: &AppState) -> AppResult<(Vec<Author>, Vec<Genre>)> {
    let repo = &state.repository;
    let (authors, genres) = tokio::try_join!(repo.authors.list(), repo.genres.list())?;
    Ok((authors, genres))
}

/// Book create form with author and genre selection lists
pub async fn create_form(State(state): State<AppState>) -> AppResult<BookFormPage> {
    let (authors, genres) = load_reference_lists(&state).await?;
    Ok(BookFormPage::new(
        "Create Book",
        NewBook::default(),
        authors,
        genres,
        Vec::new(),
    ))
}

fn parse_input(form: &BookForm) -> BookInput {
    BookInput {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        isbn: form.isbn.trim().to_string(),
        author_id: form.author.trim().parse().ok(),
        genre_ids: form.genre.clone(),
    }
}

/// Handle book create
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let input = parse_input(&form);
    if let Err(e) = input.validate() {
        errors.extend(forms::validation_messages(&e));
    }
    let book = input.sanitize();

    if !errors.is_empty() {
        // Render the form again with sanitized data and the previously
        // selected references re-marked
        let (authors, genres) = load_reference_lists(&state).await?;
        return Ok(BookFormPage::new("Create Book", book, authors, genres, errors).into_response());
    }

    let id = state.repository.books.insert(&book).await?;
    Ok(Redirect::to(&format!("/book/{}", id)).into_response())
}

/// Book update form, pre-filled from the stored document
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(book) = state.repository.books.find_by_id(id).await? else {
        return Ok(Redirect::to("/book").into_response());
    };
    let (authors, genres) = load_reference_lists(&state).await?;
    let book = NewBook {
        title: book.title,
        description: book.description,
        isbn: book.isbn,
        author_id: book.author_id,
        genre_ids: book.genre_ids,
    };
    Ok(BookFormPage::new("Update Book", book, authors, genres, Vec::new()).into_response())
}

/// Handle book update: overwrite the mutable fields in place
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let input = parse_input(&form);
    if let Err(e) = input.validate() {
        errors.extend(forms::validation_messages(&e));
    }
    let book = input.sanitize();

    if !errors.is_empty() {
        let (authors, genres) = load_reference_lists(&state).await?;
        return Ok(BookFormPage::new("Update Book", book, authors, genres, errors).into_response());
    }

    state.repository.books.update(id, &book).await?;
    Ok(Redirect::to(&format!("/book/{}", id)).into_response())
}

#[derive(Template)]
#[template(path = "book_delete.html")]
pub struct BookDeletePage {
    title: &'static str,
    book: Book,
    instances: Vec<BookInstance>,
}

/// Delete confirmation, listing the physical copies of this book
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(book) = state.repository.books.find_by_id(id).await? else {
        return Ok(Redirect::to("/book").into_response());
    };
    let instances = state.repository.book_instances.list_by_book(id).await?;
    Ok(BookDeletePage {
        title: "Delete Book",
        book,
        instances,
    }
    .into_response())
}

/// Handle book delete: unconditional, by identifier
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Redirect> {
    state.repository.books.delete(id).await?;
    Ok(Redirect::to("/book"))
}
