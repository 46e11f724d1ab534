//! Book instance service

use std::{collections::HashMap, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceForm, BookInstanceInput},
    repository::CatalogStore,
    validation::{self, FieldError, Rejected},
};

use super::Submission;

/// A copy in the list, with its book resolved
#[derive(Debug, Clone)]
pub struct BookInstanceEntry {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// A copy and the book it belongs to
#[derive(Debug, Clone)]
pub struct BookInstanceDetail {
    pub instance: BookInstance,
    pub book: Book,
}

#[derive(Clone)]
pub struct BookInstanceService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstanceService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All copies with their books
    pub async fn list(&self) -> AppResult<Vec<BookInstanceEntry>> {
        let (instances, books) =
            tokio::try_join!(self.store.book_instance_list(), self.store.book_list())?;
        let books: HashMap<i32, Book> = books.into_iter().map(|b| (b.id, b)).collect();

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.get(&instance.book_id).cloned();
                BookInstanceEntry { instance, book }
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> AppResult<BookInstance> {
        self.store.book_instance_get(id).await
    }

    pub async fn detail(&self, id: i32) -> AppResult<BookInstanceDetail> {
        let instance = self.store.book_instance_get(id).await?;
        let book = self.store.book_get(instance.book_id).await?;
        Ok(BookInstanceDetail { instance, book })
    }

    /// Books a copy can belong to
    pub async fn options(&self) -> AppResult<Vec<Book>> {
        self.store.book_list().await
    }

    /// Stored copy as a pre-filled form, with the books to choose from
    pub async fn edit(&self, id: i32) -> AppResult<(BookInstanceForm, Vec<Book>)> {
        let (instance, books) =
            tokio::try_join!(self.store.book_instance_get(id), self.store.book_list())?;
        Ok((BookInstanceForm::from(&instance), books))
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        let (form, input) = match validation::sanitize(form) {
            Ok(sanitized) => sanitized,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        if let Some(error) = self.missing_book(&input).await? {
            return Ok(Submission::Rejected(Rejected {
                form,
                errors: vec![error],
            }));
        }

        let instance = self.store.book_instance_create(&input).await?;
        tracing::info!("Book instance {} created for book {}", instance.id, instance.book_id);
        Ok(Submission::Saved(instance))
    }

    pub async fn update(
        &self,
        id: i32,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        self.store.book_instance_get(id).await?;

        let (form, input) = match validation::sanitize(form) {
            Ok(sanitized) => sanitized,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        if let Some(error) = self.missing_book(&input).await? {
            return Ok(Submission::Rejected(Rejected {
                form,
                errors: vec![error],
            }));
        }

        let instance = self.store.book_instance_update(id, &input).await?;
        tracing::info!("Book instance {} updated", instance.id);
        Ok(Submission::Saved(instance))
    }

    /// Copies have no dependents and are always deleted
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.book_instance_delete(id).await?;
        tracing::info!("Book instance {} deleted", id);
        Ok(())
    }

    async fn missing_book(&self, input: &BookInstanceInput) -> AppResult<Option<FieldError>> {
        match self.store.book_get(input.book_id).await {
            Ok(_) => Ok(None),
            Err(AppError::NotFound(_)) => {
                Ok(Some(FieldError::new("book", "Selected book does not exist.")))
            }
            Err(e) => Err(e),
        }
    }
}
