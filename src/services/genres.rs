//! Genre service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, Genre, GenreForm},
    repository::CatalogStore,
    validation::{self, FieldError, Rejected},
};

use super::{Deletion, Submission};

/// A genre with the books tagged with it
#[derive(Debug, Clone)]
pub struct GenreDetail {
    pub genre: Genre,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct GenreService {
    store: Arc<dyn CatalogStore>,
}

impl GenreService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.genre_list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Genre> {
        self.store.genre_get(id).await
    }

    pub async fn detail(&self, id: i32) -> AppResult<GenreDetail> {
        let (genre, books) =
            tokio::try_join!(self.store.genre_get(id), self.store.books_by_genre(id))?;
        Ok(GenreDetail { genre, books })
    }

    /// Create a genre, or return the existing one with the same name.
    ///
    /// Lookup and insert are not atomic; two concurrent submissions may both insert.
    pub async fn create(&self, form: GenreForm) -> AppResult<Submission<Genre, GenreForm>> {
        let (_, input) = match validation::sanitize(form) {
            Ok(sanitized) => sanitized,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        if let Some(existing) = self.store.genre_find_by_name(&input.name).await? {
            tracing::info!("Genre {} already exists as {}", input.name, existing.id);
            return Ok(Submission::Saved(existing));
        }

        let genre = self.store.genre_create(&input).await?;
        tracing::info!("Genre {} created", genre.id);
        Ok(Submission::Saved(genre))
    }

    /// Rename a genre; the new name may not belong to another genre
    pub async fn update(&self, id: i32, form: GenreForm) -> AppResult<Submission<Genre, GenreForm>> {
        self.store.genre_get(id).await?;

        let (form, input) = match validation::sanitize(form) {
            Ok(sanitized) => sanitized,
            Err(rejected) => return Ok(Submission::Rejected(rejected)),
        };

        if let Some(existing) = self.store.genre_find_by_name(&input.name).await? {
            if existing.id != id {
                return Ok(Submission::Rejected(Rejected {
                    form,
                    errors: vec![FieldError::new("name", "A genre with this name already exists.")],
                }));
            }
        }

        let genre = self.store.genre_update(id, &input).await?;
        tracing::info!("Genre {} updated", genre.id);
        Ok(Submission::Saved(genre))
    }

    /// Delete a genre unless books are still tagged with it
    pub async fn delete(&self, id: i32) -> AppResult<Deletion<GenreDetail>> {
        let detail = self.detail(id).await?;
        if !detail.books.is_empty() {
            tracing::warn!(
                "Genre {} not deleted: {} book(s) still reference it",
                id,
                detail.books.len()
            );
            return Ok(Deletion::Blocked(detail));
        }

        self.store.genre_delete(id).await?;
        tracing::info!("Genre {} deleted", id);
        Ok(Deletion::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        error::AppError,
        repository::MockCatalogStore,
        services::fixtures::{book, genre},
    };

    fn service(store: MockCatalogStore) -> GenreService {
        GenreService::new(Arc::new(store))
    }

    fn form(name: &str) -> GenreForm {
        GenreForm {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn existing_name_returns_existing_genre() {
        let mut store = MockCatalogStore::new();
        store
            .expect_genre_find_by_name()
            .withf(|name| name.to_string() == "Fantasy")
            .returning(|_| Ok(Some(genre(4, "Fantasy"))));
        store.expect_genre_create().never();

        match service(store).create(form(" Fantasy ")).await.unwrap() {
            Submission::Saved(genre) => assert_eq!(genre.id, 4),
            Submission::Rejected(_) => panic!("expected existing genre"),
        }
    }

    #[tokio::test]
    async fn new_name_is_inserted() {
        let mut store = MockCatalogStore::new();
        store.expect_genre_find_by_name().returning(|_| Ok(None));
        store
            .expect_genre_create()
            .times(1)
            .returning(|input| Ok(genre(8, &input.name)));

        match service(store).create(form("Science Fiction")).await.unwrap() {
            Submission::Saved(genre) => assert_eq!(genre.url(), "/catalog/genre/8"),
            Submission::Rejected(_) => panic!("expected insert"),
        }
    }

    #[tokio::test]
    async fn short_name_is_rejected() {
        let mut store = MockCatalogStore::new();
        store.expect_genre_find_by_name().never();
        store.expect_genre_create().never();

        match service(store).create(form("SF")).await.unwrap() {
            Submission::Rejected(rejected) => {
                assert_eq!(rejected.errors[0].field, "name");
                assert_eq!(rejected.form.name, "SF");
            }
            Submission::Saved(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn rename_to_another_genres_name_is_rejected() {
        let mut store = MockCatalogStore::new();
        store.expect_genre_get().returning(|id| Ok(genre(id, "Verse")));
        store
            .expect_genre_find_by_name()
            .returning(|_| Ok(Some(genre(2, "Poetry"))));
        store.expect_genre_update().never();

        match service(store).update(5, form("Poetry")).await.unwrap() {
            Submission::Rejected(rejected) => {
                assert_eq!(rejected.errors[0].message, "A genre with this name already exists.")
            }
            Submission::Saved(_) => panic!("expected rejection"),
        }
    }

    #[tokio::test]
    async fn rename_keeping_own_name_is_allowed() {
        let mut store = MockCatalogStore::new();
        store.expect_genre_get().with(eq(5)).returning(|id| Ok(genre(id, "poetry")));
        store
            .expect_genre_find_by_name()
            .returning(|_| Ok(Some(genre(5, "poetry"))));
        store
            .expect_genre_update()
            .with(eq(5), mockall::predicate::always())
            .returning(|id, input| Ok(genre(id, &input.name)));

        match service(store).update(5, form("Poetry")).await.unwrap() {
            Submission::Saved(genre) => assert_eq!(genre.name, "Poetry"),
            Submission::Rejected(_) => panic!("expected update"),
        }
    }

    #[tokio::test]
    async fn invalid_rename_of_unknown_genre_is_not_found() {
        let mut store = MockCatalogStore::new();
        store
            .expect_genre_get()
            .returning(|id| Err(AppError::NotFound(format!("Genre {} not found", id))));
        store.expect_genre_find_by_name().never();
        store.expect_genre_update().never();

        let err = service(store).update(404, form("SF")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_blocked_by_books() {
        let mut store = MockCatalogStore::new();
        store.expect_genre_get().returning(|id| Ok(genre(id, "Poetry")));
        store.expect_books_by_genre().returning(|_| Ok(vec![book(3, 1)]));
        store.expect_genre_delete().never();

        assert!(matches!(
            service(store).delete(5).await.unwrap(),
            Deletion::Blocked(_)
        ));
    }

    #[tokio::test]
    async fn delete_without_books_removes_genre() {
        let mut store = MockCatalogStore::new();
        store.expect_genre_get().returning(|id| Ok(genre(id, "Poetry")));
        store.expect_books_by_genre().returning(|_| Ok(vec![]));
        store.expect_genre_delete().with(eq(5)).times(1).returning(|_| Ok(()));

        assert!(matches!(service(store).delete(5).await.unwrap(), Deletion::Deleted));
    }

    #[tokio::test]
    async fn delete_of_unknown_genre_is_not_found() {
        let mut store = MockCatalogStore::new();
        store
            .expect_genre_get()
            .returning(|id| Err(AppError::NotFound(format!("Genre {} not found", id))));
        store.expect_books_by_genre().returning(|_| Ok(vec![]));
        store.expect_genre_delete().never();

        assert!(matches!(
            service(store).delete(5).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
