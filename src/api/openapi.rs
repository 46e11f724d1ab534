//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, catalog, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library",
        version = "1.0.0",
        description = "Catalog pages for authors, books, genres and book copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::index,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::delete_author_form,
        authors::delete_author,
        authors::update_author_form,
        authors::update_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book_form,
        books::create_book,
        books::delete_book_form,
        books::delete_book,
        books::update_book_form,
        books::update_book,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre_form,
        genres::create_genre,
        genres::delete_genre_form,
        genres::delete_genre,
        genres::update_genre_form,
        genres::update_genre,
        // Book instances
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance_form,
        book_instances::create_book_instance,
        book_instances::delete_book_instance_form,
        book_instances::delete_book_instance,
        book_instances::update_book_instance_form,
        book_instances::update_book_instance,
    ),
    components(
        schemas(
            crate::models::AuthorForm,
            crate::models::BookForm,
            crate::models::GenreForm,
            crate::models::BookInstanceForm,
            crate::models::BookStatus,
            crate::services::catalog::CatalogCounts,
            health::HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog home page"),
        (name = "authors", description = "Author pages"),
        (name = "books", description = "Book pages"),
        (name = "genres", description = "Genre pages"),
        (name = "bookinstances", description = "Book copy pages")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_catalog_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/catalog",
            "/catalog/authors",
            "/catalog/author/{id}/update",
            "/catalog/book/create",
            "/catalog/genre/{id}/delete",
            "/catalog/bookinstance/{id}",
            "/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
