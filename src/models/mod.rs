//! Catalog entity models

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

pub use author::{Author, AuthorInput, NewAuthor};
pub use book::{Book, BookDetail, BookInput, BookWithAuthor, NewBook};
pub use book_instance::{
    BookInstance, BookInstanceInput, BookInstanceWithBook, CopyStatus, NewBookInstance,
};
pub use genre::{Genre, GenreInput, NewGenre};
