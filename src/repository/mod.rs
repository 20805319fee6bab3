//! Repository layer for database operations
//!
//! Reference columns carry no foreign-key constraints: references between
//! entities are weak ids, resolved at read time by the explicit population
//! helpers on each sub-repository. There is no cascading delete; deleting
//! an author or genre can leave dangling references on books.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
    pub genres: genres::GenresRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            pool,
        }
    }
}
