//! Book instance (physical copy) endpoints

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
        book_instance::BookInstanceForm, Book, BookInstanceInput, BookInstanceWithBook,
        CopyStatus, NewBookInstance,
    },
    AppState,
};

#[derive(Template)]
#[template(path = "book_instance_list.html")]
pub struct BookInstanceListPage {
    title: &'static str,
    instances: Vec<BookInstanceWithBook>,
}

/// List of all book instances with their books populated
pub async fn list(State(state): State<AppState>) -> AppResult<BookInstanceListPage> {
    let instances = state.repository.book_instances.list().await?;
    Ok(BookInstanceListPage {
        title: "Book Instance List",
        instances,
    })
}

#[derive(Template)]
#[template(path = "book_instance_detail.html")]
pub struct BookInstanceDetailPage {
    instance: Option<BookInstanceWithBook>,
}

/// Detail page for a specific book instance
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<BookInstanceDetailPage> {
    let instance = state.repository.book_instances.find_detail(id).await?;
    Ok(BookInstanceDetailPage { instance })
}

#[derive(Template)]
#[template(path = "book_instance_form.html")]
pub struct BookInstanceFormPage {
    title: &'static str,
    instance: NewBookInstance,
    books: Vec<(Book, bool)>,
    statuses: Vec<(&'static str, bool)>,
    errors: Vec<String>,
}

impl BookInstanceFormPage {
    fn new(
        title: &'static str,
        instance: NewBookInstance,
        books: Vec<Book>,
        errors: Vec<String>,
    ) -> Self {
        let books = books
            .into_iter()
            .map(|b| {
                let selected = instance.book_id == Some(b.id);
                (b, selected)
            })
            .collect();
        let statuses = CopyStatus::ALL
            .iter()
            .map(|s| (s.as_str(), *s == instance.status))
            .collect();
        Self {
            title,
            instance,
            books,
            statuses,
            errors,
        }
    }
}

fn empty_instance() -> NewBookInstance {
    BookInstanceInput {
        book_id: None,
        imprint: String::new(),
        status: CopyStatus::default(),
        due_back: None,
    }
    .sanitize()
}

/// Book instance create form with the book selection list
pub async fn create_form(State(state): State<AppState>) -> AppResult<BookInstanceFormPage> {
    let books = state.repository.books.list().await?;
    Ok(BookInstanceFormPage::new(
        "Create Book Instance",
        empty_instance(),
        books,
        Vec::new(),
    ))
}

fn parse_input(form: &BookInstanceForm, errors: &mut Vec<String>) -> BookInstanceInput {
    let book_id = form.book.trim().parse().ok();
    if book_id.is_none() {
        errors.push("A book must be selected.".to_string());
    }
    // A status outside the four enumerated values never reaches storage
    let status = match form.status.trim().parse::<CopyStatus>() {
        Ok(status) => status,
        Err(()) => {
            errors.push(
                "Status must be one of Available, Maintenance, Loaned or Reserved.".to_string(),
            );
            CopyStatus::default()
        }
    };
    BookInstanceInput {
        book_id,
        imprint: form.imprint.trim().to_string(),
        status,
        due_back: forms::parse_optional_date(&form.due_back, "Due back", errors),
    }
}

/// Handle book instance create
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let input = parse_input(&form, &mut errors);
    if let Err(e) = input.validate() {
        errors.extend(forms::validation_messages(&e));
    }
    let instance = input.sanitize();

    if !errors.is_empty() {
        // Render the form again with sanitized data and the selected book
        // re-marked
        let books = state.repository.books.list().await?;
        return Ok(
            BookInstanceFormPage::new("Create Book Instance", instance, books, errors)
                .into_response(),
        );
    }

    let id = state.repository.book_instances.insert(&instance).await?;
    Ok(Redirect::to(&format!("/bookInstance/{}", id)).into_response())
}

/// Book instance update form, pre-filled from the stored document
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(existing) = state.repository.book_instances.find_by_id(id).await? else {
        return Ok(Redirect::to("/bookInstance").into_response());
    };
    let books = state.repository.books.list().await?;
    let instance = NewBookInstance {
        book_id: existing.book_id,
        imprint: existing.imprint,
        status: existing.status.parse().unwrap_or_default(),
        due_back: existing.due_back,
    };
    Ok(
        BookInstanceFormPage::new("Update Book Instance", instance, books, Vec::new())
            .into_response(),
    )
}

/// Handle book instance update: overwrite the mutable fields in place
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let mut errors = Vec::new();
    let input = parse_input(&form, &mut errors);
    if let Err(e) = input.validate() {
        errors.extend(forms::validation_messages(&e));
    }
    let instance = input.sanitize();

    if !errors.is_empty() {
        let books = state.repository.books.list().await?;
        return Ok(
            BookInstanceFormPage::new("Update Book Instance", instance, books, errors)
                .into_response(),
        );
    }

    state.repository.book_instances.update(id, &instance).await?;
    Ok(Redirect::to(&format!("/bookInstance/{}", id)).into_response())
}

#[derive(Template)]
#[template(path = "book_instance_delete.html")]
pub struct BookInstanceDeletePage {
    title: &'static str,
    instance: BookInstanceWithBook,
}

/// Delete confirmation for a book instance; a copy has no dependents
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let Some(instance) = state.repository.book_instances.find_detail(id).await? else {
        return Ok(Redirect::to("/bookInstance").into_response());
    };
    Ok(BookInstanceDeletePage {
        title: "Delete Book Instance",
        instance,
    }
    .into_response())
}

/// Handle book instance delete: unconditional, by identifier
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Redirect> {
    state.repository.book_instances.delete(id).await?;
    Ok(Redirect::to("/bookInstance"))
}
