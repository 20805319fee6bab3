//! Book instances repository for database operations

use std::collections::HashMap;

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookInstance, BookInstanceWithBook, CopyStatus, NewBookInstance},
};

const INSTANCE_COLUMNS: &str = "id, book_id, imprint, status, due_back";

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all book instances with their book references populated.
    // TODO: order by the populated book title; the historical sort key
    // addressed the unpopulated reference, so the listing was effectively
    // unordered and is kept that way.
    pub async fn list(&self) -> AppResult<Vec<BookInstanceWithBook>> {
        let instances = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {} FROM book_instances ORDER BY id",
            INSTANCE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        self.populate_books(instances).await
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<BookInstance>> {
        let instance = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            INSTANCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(instance)
    }

    /// Load a book instance with its book reference populated
    pub async fn find_detail(&self, id: i32) -> AppResult<Option<BookInstanceWithBook>> {
        let Some(instance) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let book = match instance.book_id {
            Some(book_id) => {
                sqlx::query_as::<_, Book>(
                    "SELECT id, title, description, isbn, author_id, genre_ids \
                     FROM books WHERE id = $1",
                )
                .bind(book_id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => None,
        };
        Ok(Some(BookInstanceWithBook { instance, book }))
    }

    /// Instances referencing the given book
    pub async fn list_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let instances = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {} FROM book_instances WHERE book_id = $1 ORDER BY id",
            INSTANCE_COLUMNS
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(instances)
    }

    /// Resolve the book reference of each instance with one batched query
    pub async fn populate_books(
        &self,
        instances: Vec<BookInstance>,
    ) -> AppResult<Vec<BookInstanceWithBook>> {
        let book_ids: Vec<i32> = instances.iter().filter_map(|c| c.book_id).collect();
        let books: HashMap<i32, Book> = if book_ids.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<_, Book>(
                "SELECT id, title, description, isbn, author_id, genre_ids \
                 FROM books WHERE id = ANY($1)",
            )
            .bind(&book_ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect()
        };

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = instance.book_id.and_then(|id| books.get(&id).cloned());
                BookInstanceWithBook { instance, book }
            })
            .collect())
    }

    pub async fn insert(&self, instance: &NewBookInstance) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.status.as_str())
        .bind(instance.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Full replace of the mutable fields, identifier preserved
    pub async fn update(&self, id: i32, instance: &NewBookInstance) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.status.as_str())
        .bind(instance.due_back)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Unconditional delete by identifier
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: CopyStatus) -> AppResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
