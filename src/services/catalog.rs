//! Catalog overview service

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::BookStatus, repository::CatalogStore};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub book_instances_available: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Count every collection at once
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
            self.store.book_count(),
            self.store.book_instance_count(),
            self.store.book_instance_count_by_status(BookStatus::Available),
            self.store.author_count(),
            self.store.genre_count(),
        )?;

        Ok(CatalogCounts {
            books,
            book_instances,
            book_instances_available,
            authors,
            genres,
        })
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, repository::MockCatalogStore};

    #[tokio::test]
    async fn counts_every_collection() {
        let mut store = MockCatalogStore::new();
        store.expect_book_count().returning(|| Ok(4));
        store.expect_book_instance_count().returning(|| Ok(9));
        store
            .expect_book_instance_count_by_status()
            .withf(|status| *status == BookStatus::Available)
            .returning(|_| Ok(3));
        store.expect_author_count().returning(|| Ok(2));
        store.expect_genre_count().returning(|| Ok(5));

        let service = CatalogService::new(Arc::new(store));
        let counts = service.counts().await.unwrap();

        assert_eq!(
            counts,
            CatalogCounts {
                books: 4,
                book_instances: 9,
                book_instances_available: 3,
                authors: 2,
                genres: 5,
            }
        );
    }

    #[tokio::test]
    async fn first_failure_is_forwarded() {
        let mut store = MockCatalogStore::new();
        store.expect_book_count().returning(|| Ok(4));
        store
            .expect_book_instance_count()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        store.expect_book_instance_count_by_status().returning(|_| Ok(3));
        store.expect_author_count().returning(|| Ok(2));
        store.expect_genre_count().returning(|| Ok(5));

        let service = CatalogService::new(Arc::new(store));
        let err = service.counts().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
