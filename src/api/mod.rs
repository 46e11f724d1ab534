//! HTTP handlers and routing for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Request, State},
    http::request::Parts,
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use maud::Markup;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::{AppError, ErrorPage},
    validation, views, AppState,
};

/// Record identifier taken from the `:id` path segment.
///
/// Anything that is not a positive integer cannot name a record and is
/// rejected as not found.
pub struct RecordId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        validation::parse_id(&raw)
            .map(RecordId)
            .ok_or_else(|| AppError::NotFound(format!("No record with id {}", raw)))
    }
}

/// Turn a view into a response body
pub fn render(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

async fn home() -> Redirect {
    Redirect::to("/catalog")
}

async fn not_found(request: Request) -> AppError {
    AppError::NotFound(format!("No route for {}", request.uri().path()))
}

/// Replace the body of every failed response with the HTML error page
async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(error) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };

    let page = views::error::render(&error, state.config.is_development());
    (error.status, render(page)).into_response()
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route(
            "/author/create",
            get(authors::create_author_form).post(authors::create_author),
        )
        .route("/author/:id", get(authors::get_author))
        .route(
            "/author/:id/delete",
            get(authors::delete_author_form).post(authors::delete_author),
        )
        .route(
            "/author/:id/update",
            get(authors::update_author_form).post(authors::update_author),
        )
        // Books
        .route("/books", get(books::list_books))
        .route(
            "/book/create",
            get(books::create_book_form).post(books::create_book),
        )
        .route("/book/:id", get(books::get_book))
        .route(
            "/book/:id/delete",
            get(books::delete_book_form).post(books::delete_book),
        )
        .route(
            "/book/:id/update",
            get(books::update_book_form).post(books::update_book),
        )
        // Genres
        .route("/genres", get(genres::list_genres))
        .route(
            "/genre/create",
            get(genres::create_genre_form).post(genres::create_genre),
        )
        .route("/genre/:id", get(genres::get_genre))
        .route(
            "/genre/:id/delete",
            get(genres::delete_genre_form).post(genres::delete_genre),
        )
        .route(
            "/genre/:id/update",
            get(genres::update_genre_form).post(genres::update_genre),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/bookinstance/create",
            get(book_instances::create_book_instance_form)
                .post(book_instances::create_book_instance),
        )
        .route("/bookinstance/:id", get(book_instances::get_book_instance))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_book_instance_form)
                .post(book_instances::delete_book_instance),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_book_instance_form)
                .post(book_instances::update_book_instance),
        );

    let app = Router::new()
        .route("/", get(home))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .fallback(not_found)
        .with_state(state.clone());

    app.merge(openapi::create_openapi_router())
        .layer(middleware::from_fn_with_state(state, render_error_pages))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use mockall::predicate::eq;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig,
        models::{Author, Book, BookStatus},
        repository::MockCatalogStore,
        services::{
            fixtures::{author, book, genre, instance},
            Services,
        },
    };

    fn app(store: MockCatalogStore) -> Router {
        app_with_config(store, AppConfig::default())
    }

    fn app_with_config(store: MockCatalogStore, config: AppConfig) -> Router {
        create_router(AppState {
            config: Arc::new(config),
            services: Arc::new(Services::new(Arc::new(store))),
        })
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn not_found_book(id: i32) -> Result<Book, AppError> {
        Err(AppError::NotFound(format!("Book {} not found", id)))
    }

    #[tokio::test]
    async fn root_redirects_to_catalog() {
        let response = app(MockCatalogStore::new()).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/catalog");
    }

    #[tokio::test]
    async fn unknown_book_renders_404_page() {
        let mut store = MockCatalogStore::new();
        store.expect_book_get().returning(not_found_book);
        store.expect_book_instances_by_book().returning(|_| Ok(vec![]));

        let response = app(store).oneshot(get("/catalog/book/999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = body_text(response).await;
        assert!(html.contains("<h2>404 Not Found</h2>"));
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_author_get().never();

        let response = app(store).oneshot(get("/catalog/author/abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let response = app(MockCatalogStore::new())
            .oneshot(get("/catalog/publishers"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Not Found"));
    }

    #[tokio::test]
    async fn error_detail_is_hidden_outside_development() {
        let mut config = AppConfig::default();
        config.server.environment = "production".to_string();
        let mut store = MockCatalogStore::new();
        store
            .expect_author_list()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let response = app_with_config(store, config)
            .oneshot(get("/catalog/authors"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body_text(response).await;
        assert!(html.contains("Internal Server Error"));
        assert!(!html.contains("pool timed out"));
    }

    #[tokio::test]
    async fn invalid_author_form_is_shown_again() {
        let mut store = MockCatalogStore::new();
        store.expect_author_create().never();

        let response = app(store)
            .oneshot(post_form("/catalog/author/create", "first_name=Jane&family_name="))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Family name must be specified."));
        assert!(html.contains(r#"value="Jane""#));
    }

    #[tokio::test]
    async fn valid_author_redirects_to_detail() {
        let mut store = MockCatalogStore::new();
        store.expect_author_create().times(1).returning(|input| {
            Ok(Author {
                id: 1,
                first_name: input.first_name.clone(),
                family_name: input.family_name.clone(),
                date_of_birth: input.date_of_birth,
                date_of_death: input.date_of_death,
            })
        });

        let response = app(store)
            .oneshot(post_form("/catalog/author/create", "first_name=Jane&family_name=Austen"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/catalog/author/1");
    }

    #[tokio::test]
    async fn author_detail_shows_display_name() {
        let mut store = MockCatalogStore::new();
        store.expect_author_get().returning(|id| Ok(author(id)));
        store.expect_books_by_author().returning(|id| Ok(vec![book(5, id)]));

        let response = app(store).oneshot(get("/catalog/author/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Austen , Jane"));
        assert!(html.contains("/catalog/book/5"));
    }

    #[tokio::test]
    async fn invalid_update_of_unknown_author_is_not_found() {
        let mut store = MockCatalogStore::new();
        store
            .expect_author_get()
            .returning(|id| Err(AppError::NotFound(format!("Author {} not found", id))));
        store.expect_author_update().never();

        let response = app(store)
            .oneshot(post_form("/catalog/author/999/update", "first_name=&family_name=Austen"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("<h2>404 Not Found</h2>"));
    }

    #[tokio::test]
    async fn book_update_redirects_to_detail() {
        let mut store = MockCatalogStore::new();
        store.expect_book_get().with(eq(3)).returning(|id| Ok(book(id, 1)));
        store.expect_author_get().returning(|id| Ok(author(id)));
        store
            .expect_genre_get_many()
            .returning(|ids| Ok(ids.iter().map(|&id| genre(id, "Romance")).collect()));
        store
            .expect_book_update()
            .withf(|id, input| *id == 3 && input.title == "Persuasion" && input.genre_ids == vec![1, 2])
            .times(1)
            .returning(|id, input| {
                Ok(Book {
                    id,
                    title: input.title.clone(),
                    author_id: input.author_id,
                    summary: input.summary.clone(),
                    isbn: input.isbn.clone(),
                    genre_ids: input.genre_ids.clone(),
                })
            });

        let response = app(store)
            .oneshot(post_form(
                "/catalog/book/3/update",
                "title=Persuasion&author=1&summary=Second+chances.&isbn=9780141439686&genre=1&genre=2",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/catalog/book/3");
    }

    #[tokio::test]
    async fn author_with_books_is_kept() {
        let mut store = MockCatalogStore::new();
        store.expect_author_get().returning(|id| Ok(author(id)));
        store.expect_books_by_author().returning(|id| Ok(vec![book(5, id)]));
        store.expect_author_delete().never();

        let response = app(store)
            .oneshot(post_form("/catalog/author/1/delete", "authorid=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Delete the following books"));
    }

    #[tokio::test]
    async fn book_form_submission_accepts_repeated_genres() {
        let mut store = MockCatalogStore::new();
        store.expect_author_get().returning(|id| Ok(author(id)));
        store.expect_genre_get_many().returning(|ids| {
            Ok(ids
                .iter()
                .map(|id| crate::services::fixtures::genre(*id, "Romance"))
                .collect())
        });
        store
            .expect_book_create()
            .withf(|input| input.genre_ids == vec![1, 2])
            .returning(|input| {
                Ok(Book {
                    id: 9,
                    title: input.title.clone(),
                    author_id: input.author_id,
                    summary: input.summary.clone(),
                    isbn: input.isbn.clone(),
                    genre_ids: input.genre_ids.clone(),
                })
            });

        let response = app(store)
            .oneshot(post_form(
                "/catalog/book/create",
                "title=Emma&author=1&summary=Hubris&isbn=978&genre=1&genre=2",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/catalog/book/9");
    }

    #[tokio::test]
    async fn deleting_a_copy_redirects_to_list() {
        let mut store = MockCatalogStore::new();
        store.expect_book_instance_delete().times(1).returning(|_| Ok(()));

        let response = app(store)
            .oneshot(post_form("/catalog/bookinstance/4/delete", "id=4"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/catalog/bookinstances");
    }

    #[tokio::test]
    async fn copy_detail_renders_status() {
        let mut store = MockCatalogStore::new();
        store
            .expect_book_instance_get()
            .returning(|id| Ok(instance(id, 3, BookStatus::Loaned)));
        store.expect_book_get().returning(|id| Ok(book(id, 1)));

        let response = app(store).oneshot(get("/catalog/bookinstance/4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Loaned"));
        assert!(html.contains("Due back:"));
    }
}
