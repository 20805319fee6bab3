//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, NewAuthor},
};

// Bookkeeping columns (created_at, updated_at) are never selected into
// view models.
const AUTHOR_COLUMNS: &str = "id, first_name, last_name, date_of_birth, date_of_death";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors sorted by last name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors ORDER BY last_name",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = $1",
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    /// Resolve an optional author reference to its document
    pub async fn populate(&self, author_id: Option<i32>) -> AppResult<Option<Author>> {
        match author_id {
            Some(id) => self.find_by_id(id).await,
            None => Ok(None),
        }
    }

    /// Natural-key lookup used for duplicate detection at create time
    pub async fn find_by_name(&self, first_name: &str, last_name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE first_name = $1 AND last_name = $2",
            AUTHOR_COLUMNS
        ))
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    pub async fn insert(&self, author: &NewAuthor) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO authors (first_name, last_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Full replace of the mutable fields, identifier preserved
    pub async fn update(&self, id: i32, author: &NewAuthor) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE authors
            SET first_name = $2, last_name = $3, date_of_birth = $4, date_of_death = $5,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&author.first_name)
        .bind(&author.last_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Unconditional delete by identifier
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
