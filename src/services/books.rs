//! Book service

use std::{collections::HashMap, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookForm, BookInput, BookInstance, Genre},
    repository::CatalogStore,
    validation::{self, FieldError, Rejected},
};

use super::{Deletion, Submission};

/// A book in the list, with its author resolved
#[derive(Debug, Clone)]
pub struct BookEntry {
    pub book: Book,
    /// `None` when the referenced author no longer exists
    pub author: Option<Author>,
}

/// A book with its author, genres and copies
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Choices offered by the book form
#[derive(Debug, Clone, Default)]
pub struct BookOptions {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn CatalogStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All books with their authors
    pub async fn list(&self) -> AppResult<Vec<BookEntry>> {
        let (books, authors) = tokio::try_join!(self.store.book_list(), self.store.author_list())?;
        let authors: HashMap<i32, Author> = authors.into_iter().map(|a| (a.id, a)).collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let author = authors.get(&book.author_id).cloned();
                BookEntry { book, author }
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<Book> {
        self.store.book_get(id).await
    }

    /// Book and its copies are fetched together, then author and genres are resolved
    pub async fn detail(&self, id: i32) -> AppResult<BookDetail> {
        let (book, instances) =
            tokio::try_join!(self.store.book_get(id), self.store.book_instances_by_book(id))?;
        let (author, genres) = tokio::try_join!(
            self.store.author_get(book.author_id),
            self.store.genre_get_many(&book.genre_ids),
        )?;

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    /// Authors and genres to choose from
    pub async fn options(&self) -> AppResult<BookOptions> {
        let (authors, genres) = tokio::try_join!(self.store.author_list(), self.store.genre_list())?;
        Ok(BookOptions { authors, genres })
    }

    /// Stored book as a pre-filled form, with the choices
    pub async fn edit(&self, id: i32) -> AppResult<(BookForm, BookOptions)> {
        let (book, authors, genres) = tokio::try_join!(
            self.store.book_get(id),
            self.store.author_list(),
            self.store.genre_list(),
        )?;
        Ok((BookForm::from(&book), BookOptions { authors, genres }))
    }

    pub async fn create(&self, form: BookForm) -> AppResult<Submission<Book, BookForm>> {
        let (form, input) = match validation::sanitize(form) {
            Ok(sanitized) => sanitized,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        let errors = self.missing_references(&input).await?;
        if !errors.is_empty() {
            return Ok(Submission::Rejected(Rejected { form, errors }));
        }

        let book = self.store.book_create(&input).await?;
        tracing::info!("Book {} created", book.id);
        Ok(Submission::Saved(book))
    }

    /// Replace a book and its genre links; an unknown id is NotFound even when the form is invalid
    pub async fn update(&self, id: i32, form: BookForm) -> AppResult<Submission<Book, BookForm>> {
        self.store.book_get(id).await?;

        let (form, input) = match validation::sanitize(form) {
            Ok(sanitized) => sanitized,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        let errors = self.missing_references(&input).await?;
        if !errors.is_empty() {
            return Ok(Submission::Rejected(Rejected { form, errors }));
        }

        let book = self.store.book_update(id, &input).await?;
        tracing::info!("Book {} updated", book.id);
        Ok(Submission::Saved(book))
    }

    /// Delete a book unless copies of it still exist
    pub async fn delete(&self, id: i32) -> AppResult<Deletion<BookDetail>> {
        let detail = self.detail(id).await?;
        if !detail.instances.is_empty() {
            tracing::warn!(
                "Book {} not deleted: {} copie(s) still reference it",
                id,
                detail.instances.len()
            );
            return Ok(Deletion::Blocked(detail));
        }

        self.store.book_delete(id).await?;
        tracing::info!("Book {} deleted", id);
        Ok(Deletion::Deleted)
    }

    /// Field errors for an author or genres that do not exist
    async fn missing_references(&self, input: &BookInput) -> AppResult<Vec<FieldError>> {
        let (author, genres) = tokio::join!(
            self.store.author_get(input.author_id),
            self.store.genre_get_many(&input.genre_ids),
        );

        let mut errors = Vec::new();
        match author {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                errors.push(FieldError::new("author", "Selected author does not exist."))
            }
            Err(e) => return Err(e),
        }
        if genres?.len() != input.genre_ids.len() {
            errors.push(FieldError::new("genre", "Selected genre does not exist."));
        }
        Ok(errors)
    }
}
