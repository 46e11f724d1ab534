//! Author service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Author, AuthorForm, Book},
    repository::CatalogStore,
    validation,
};

use super::{Deletion, Submission};

/// An author with the books that reference it
#[derive(Debug, Clone)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.author_list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Author> {
        self.store.author_get(id).await
    }

    /// Author and their books, fetched together
    pub async fn detail(&self, id: i32) -> AppResult<AuthorDetail> {
        let (author, books) =
            tokio::try_join!(self.store.author_get(id), self.store.books_by_author(id))?;
        Ok(AuthorDetail { author, books })
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Submission<Author, AuthorForm>> {
        let (_, input) = match validation::sanitize(form) {
            Ok(sanitized) => sanitized,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        let author = self.store.author_create(&input).await?;
        tracing::info!("Author {} created", author.id);
        Ok(Submission::Saved(author))
    }

    /// Replace an author; an unknown id is NotFound even when the form is invalid
    pub async fn update(&self, id: i32, form: AuthorForm) -> AppResult<Submission<Author, AuthorForm>> {
        self.store.author_get(id).await?;

        let (_, input) = match validation::sanitize(form) {
            Ok(sanitized) => sanitized,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        let author = self.store.author_update(id, &input).await?;
        tracing::info!("Author {} updated", author.id);
        Ok(Submission::Saved(author))
    }

    /// Delete an author unless books still reference it.
    ///
    /// The check and the delete are separate statements; a book created in
    /// between makes the delete fail on the foreign key.
    pub async fn delete(&self, id: i32) -> AppResult<Deletion<AuthorDetail>> {
        let detail = self.detail(id).await?;
        if !detail.books.is_empty() {
            tracing::warn!(
                "Author {} not deleted: {} book(s) still reference it",
                id,
                detail.books.len()
            );
            return Ok(Deletion::Blocked(detail));
        }

        self.store.author_delete(id).await?;
        tracing::info!("Author {} deleted", id);
        Ok(Deletion::Deleted)
    }
}
