//! Genres repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Genre, NewGenre},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all genres sorted by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    /// Natural-key lookup used for duplicate detection at create time
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    pub async fn insert(&self, genre: &NewGenre) -> AppResult<i32> {
        let (id,): (i32,) = sqlx::query_as("INSERT INTO genres (name) VALUES ($1) RETURNING id")
            .bind(&genre.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    /// Full replace of the mutable fields, identifier preserved
    pub async fn update(&self, id: i32, genre: &NewGenre) -> AppResult<()> {
        sqlx::query("UPDATE genres SET name = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(&genre.name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Unconditional delete by identifier
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
