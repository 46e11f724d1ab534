//! Business logic services
//!
//! Each service orchestrates store calls for one entity and hands plain view
//! models to the API layer. Independent reads are issued together with
//! `tokio::try_join!`, so the first failure wins and the other results are dropped.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use std::sync::Arc;

use crate::{repository::CatalogStore, validation::Rejected};

/// Outcome of a create or update form submission
#[derive(Debug)]
pub enum Submission<T, F> {
    /// Stored (or, for genres, an identical record already existed)
    Saved(T),
    /// Validation failed; nothing was written
    Rejected(Rejected<F>),
}

/// Outcome of a delete request on a record that may have dependents
#[derive(Debug)]
pub enum Deletion<T> {
    Deleted,
    /// Dependents still reference the record; carries the record and its dependents
    Blocked(T),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorService,
    pub books: books::BookService,
    pub genres: genres::GenreService,
    pub book_instances: book_instances::BookInstanceService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            authors: authors::AuthorService::new(store.clone()),
            books: books::BookService::new(store.clone()),
            genres: genres::GenreService::new(store.clone()),
            book_instances: book_instances::BookInstanceService::new(store),
        }
    }
}
