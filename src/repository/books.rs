//! Books repository for database operations
//!
//! Author and genre references on a book are weak ids; the population
//! helpers here resolve them with a second query at read time.

use std::collections::HashMap;

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book, BookDetail, BookWithAuthor, Genre, NewBook},
};

const BOOK_COLUMNS: &str = "id, title, description, isbn, author_id, genre_ids";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all books sorted by title
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY title",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// List all books with their author references populated
    pub async fn list_with_authors(&self) -> AppResult<Vec<BookWithAuthor>> {
        let books = self.list().await?;
        self.populate_authors(books).await
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Load a book with author and genre references populated
    pub async fn find_detail(&self, id: i32) -> AppResult<Option<BookDetail>> {
        let Some(book) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let author = match book.author_id {
            Some(author_id) => {
                sqlx::query_as::<_, Author>(
                    "SELECT id, first_name, last_name, date_of_birth, date_of_death \
                     FROM authors WHERE id = $1",
                )
                .bind(author_id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => None,
        };
        let genres = self.populate_genres(&book.genre_ids).await?;
        Ok(Some(BookDetail {
            book,
            author,
            genres,
        }))
    }

    /// Books referencing the given author
    pub async fn list_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE author_id = $1 ORDER BY title",
            BOOK_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Books whose genre id list contains the given genre
    pub async fn list_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre_ids) ORDER BY title",
            BOOK_COLUMNS
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    /// Resolve the author reference of each book with one batched query
    pub async fn populate_authors(&self, books: Vec<Book>) -> AppResult<Vec<BookWithAuthor>> {
        let author_ids: Vec<i32> = books.iter().filter_map(|b| b.author_id).collect();
        let authors: HashMap<i32, Author> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<_, Author>(
                "SELECT id, first_name, last_name, date_of_birth, date_of_death \
                 FROM authors WHERE id = ANY($1)",
            )
            .bind(&author_ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
        };

        Ok(books
            .into_iter()
            .map(|book| {
                let author = book.author_id.and_then(|id| authors.get(&id).cloned());
                BookWithAuthor { book, author }
            })
            .collect())
    }

    /// Resolve a book's genre id list to genre documents
    pub async fn populate_genres(&self, genre_ids: &[i32]) -> AppResult<Vec<Genre>> {
        if genre_ids.is_empty() {
            return Ok(Vec::new());
        }
        let genres = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE id = ANY($1) ORDER BY name",
        )
        .bind(genre_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(genres)
    }

    pub async fn insert(&self, book: &NewBook) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO books (title, description, isbn, author_id, genre_ids)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(&book.genre_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Full replace of the mutable fields, identifier preserved
    pub async fn update(&self, id: i32, book: &NewBook) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE books
            SET title = $2, description = $3, isbn = $4, author_id = $5, genre_ids = $6,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.description)
        .bind(&book.isbn)
        .bind(book.author_id)
        .bind(&book.genre_ids)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Unconditional delete by identifier
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
