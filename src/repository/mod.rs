//! Repository layer for database operations

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        Author, AuthorInput, Book, BookInput, BookInstance, BookInstanceInput, BookStatus, Genre,
        GenreInput,
    },
};

/// Data access used by the services.
///
/// Lookups by identifier fail with `AppError::NotFound` when no record matches,
/// and so do updates and deletes of missing records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn ping(&self) -> AppResult<()>;

    // Authors
    async fn author_list(&self) -> AppResult<Vec<Author>>;
    async fn author_get(&self, id: i32) -> AppResult<Author>;
    async fn author_create(&self, input: &AuthorInput) -> AppResult<Author>;
    async fn author_update(&self, id: i32, input: &AuthorInput) -> AppResult<Author>;
    async fn author_delete(&self, id: i32) -> AppResult<()>;
    async fn author_count(&self) -> AppResult<i64>;

    // Books
    async fn book_list(&self) -> AppResult<Vec<Book>>;
    async fn book_get(&self, id: i32) -> AppResult<Book>;
    async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>>;
    async fn book_create(&self, input: &BookInput) -> AppResult<Book>;
    async fn book_update(&self, id: i32, input: &BookInput) -> AppResult<Book>;
    async fn book_delete(&self, id: i32) -> AppResult<()>;
    async fn book_count(&self) -> AppResult<i64>;

    // Genres
    async fn genre_list(&self) -> AppResult<Vec<Genre>>;
    async fn genre_get(&self, id: i32) -> AppResult<Genre>;
    async fn genre_get_many(&self, ids: &[i32]) -> AppResult<Vec<Genre>>;
    async fn genre_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn genre_create(&self, input: &GenreInput) -> AppResult<Genre>;
    async fn genre_update(&self, id: i32, input: &GenreInput) -> AppResult<Genre>;
    async fn genre_delete(&self, id: i32) -> AppResult<()>;
    async fn genre_count(&self) -> AppResult<i64>;

    // Book instances
    async fn book_instance_list(&self) -> AppResult<Vec<BookInstance>>;
    async fn book_instance_get(&self, id: i32) -> AppResult<BookInstance>;
    async fn book_instances_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>>;
    async fn book_instance_create(&self, input: &BookInstanceInput) -> AppResult<BookInstance>;
    async fn book_instance_update(&self, id: i32, input: &BookInstanceInput) -> AppResult<BookInstance>;
    async fn book_instance_delete(&self, id: i32) -> AppResult<()>;
    async fn book_instance_count(&self) -> AppResult<i64>;
    async fn book_instance_count_by_status(&self, status: BookStatus) -> AppResult<i64>;
}

/// Postgres-backed store holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn author_list(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }

    async fn author_get(&self, id: i32) -> AppResult<Author> {
        self.authors_get_by_id(id).await
    }

    async fn author_create(&self, input: &AuthorInput) -> AppResult<Author> {
        self.authors_create(input).await
    }

    async fn author_update(&self, id: i32, input: &AuthorInput) -> AppResult<Author> {
        self.authors_update(id, input).await
    }

    async fn author_delete(&self, id: i32) -> AppResult<()> {
        self.authors_delete(id).await
    }

    async fn author_count(&self) -> AppResult<i64> {
        self.authors_count().await
    }

    async fn book_list(&self) -> AppResult<Vec<Book>> {
        self.books_list().await
    }

    async fn book_get(&self, id: i32) -> AppResult<Book> {
        self.books_get_by_id(id).await
    }

    async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        self.books_list_by_author(author_id).await
    }

    async fn books_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        self.books_list_by_genre(genre_id).await
    }

    async fn book_create(&self, input: &BookInput) -> AppResult<Book> {
        self.books_create(input).await
    }

    async fn book_update(&self, id: i32, input: &BookInput) -> AppResult<Book> {
        self.books_update(id, input).await
    }

    async fn book_delete(&self, id: i32) -> AppResult<()> {
        self.books_delete(id).await
    }

    async fn book_count(&self) -> AppResult<i64> {
        self.books_count().await
    }

    async fn genre_list(&self) -> AppResult<Vec<Genre>> {
        self.genres_list().await
    }

    async fn genre_get(&self, id: i32) -> AppResult<Genre> {
        self.genres_get_by_id(id).await
    }

    async fn genre_get_many(&self, ids: &[i32]) -> AppResult<Vec<Genre>> {
        self.genres_get_many(ids).await
    }

    async fn genre_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        self.genres_find_by_name(name).await
    }

    async fn genre_create(&self, input: &GenreInput) -> AppResult<Genre> {
        self.genres_create(input).await
    }

    async fn genre_update(&self, id: i32, input: &GenreInput) -> AppResult<Genre> {
        self.genres_update(id, input).await
    }

    async fn genre_delete(&self, id: i32) -> AppResult<()> {
        self.genres_delete(id).await
    }

    async fn genre_count(&self) -> AppResult<i64> {
        self.genres_count().await
    }

    async fn book_instance_list(&self) -> AppResult<Vec<BookInstance>> {
        self.book_instances_list().await
    }

    async fn book_instance_get(&self, id: i32) -> AppResult<BookInstance> {
        self.book_instances_get_by_id(id).await
    }

    async fn book_instances_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        self.book_instances_list_by_book(book_id).await
    }

    async fn book_instance_create(&self, input: &BookInstanceInput) -> AppResult<BookInstance> {
        self.book_instances_create(input).await
    }

    async fn book_instance_update(&self, id: i32, input: &BookInstanceInput) -> AppResult<BookInstance> {
        self.book_instances_update(id, input).await
    }

    async fn book_instance_delete(&self, id: i32) -> AppResult<()> {
        self.book_instances_delete(id).await
    }

    async fn book_instance_count(&self) -> AppResult<i64> {
        self.book_instances_count(None).await
    }

    async fn book_instance_count_by_status(&self, status: BookStatus) -> AppResult<i64> {
        self.book_instances_count(Some(status)).await
    }
}
