//! Author pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    error::AppResult,
    models::AuthorForm,
    services::{Deletion, Submission},
    views, AppState,
};

use super::{render, RecordId};

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list page", body = String, content_type = "text/html")
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    Ok(render(views::authors::list(&authors)))
}

/// Author with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author detail page", body = String, content_type = "text/html"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.authors.detail(id).await?;
    Ok(render(views::authors::detail(&detail)))
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Author form", body = String, content_type = "text/html")
    )
)]
pub async fn create_author_form() -> Html<String> {
    render(views::authors::form("Create Author", &AuthorForm::default(), &[]))
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Author created, redirect to its page"),
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    Ok(match state.services.authors.create(form).await? {
        Submission::Saved(author) => Redirect::to(&author.url()).into_response(),
        Submission::Rejected(rejected) => {
            render(views::authors::form("Create Author", &rejected.form, &rejected.errors))
                .into_response()
        }
    })
}

/// Delete confirmation, or the list of books blocking the delete
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Delete page", body = String, content_type = "text/html"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.authors.detail(id).await?;
    Ok(render(views::authors::delete(&detail)))
}

/// Delete an author without books
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Author deleted, redirect to the list"),
        (status = 200, description = "Author still has books", body = String, content_type = "text/html"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Response> {
    Ok(match state.services.authors.delete(id).await? {
        Deletion::Deleted => Redirect::to("/catalog/authors").into_response(),
        Deletion::Blocked(detail) => render(views::authors::delete(&detail)).into_response(),
    })
}

/// Author form filled with the stored values
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author form", body = String, content_type = "text/html"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let author = state.services.authors.get(id).await?;
    Ok(render(views::authors::form(
        "Update Author",
        &AuthorForm::from(&author),
        &[],
    )))
}

/// Update an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Author updated, redirect to its page"),
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    Ok(match state.services.authors.update(id, form).await? {
        Submission::Saved(author) => Redirect::to(&author.url()).into_response(),
        Submission::Rejected(rejected) => {
            render(views::authors::form("Update Author", &rejected.form, &rejected.errors))
                .into_response()
        }
    })
}
