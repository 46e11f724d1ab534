//! Genre pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    error::AppResult,
    models::GenreForm,
    services::{Deletion, Submission},
    views, AppState,
};

use super::{render, RecordId};

/// List all genres
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genre list page", body = String, content_type = "text/html")
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    Ok(render(views::genres::list(&genres)))
}

/// Genre with its books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre detail page", body = String, content_type = "text/html"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.genres.detail(id).await?;
    Ok(render(views::genres::detail(&detail)))
}

/// Empty genre form
#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 200, description = "Genre form", body = String, content_type = "text/html")
    )
)]
pub async fn create_genre_form() -> Html<String> {
    render(views::genres::form("Create Genre", &GenreForm::default(), &[]))
}

/// Create a genre, or go to the existing one with that name
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the new or existing genre"),
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html")
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    Ok(match state.services.genres.create(form).await? {
        Submission::Saved(genre) => Redirect::to(&genre.url()).into_response(),
        Submission::Rejected(rejected) => {
            render(views::genres::form("Create Genre", &rejected.form, &rejected.errors))
                .into_response()
        }
    })
}

/// Delete confirmation, or the list of books blocking the delete
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Delete page", body = String, content_type = "text/html"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.genres.detail(id).await?;
    Ok(render(views::genres::delete(&detail)))
}

/// Delete a genre no book uses
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 303, description = "Genre deleted, redirect to the list"),
        (status = 200, description = "Genre still has books", body = String, content_type = "text/html"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Response> {
    Ok(match state.services.genres.delete(id).await? {
        Deletion::Deleted => Redirect::to("/catalog/genres").into_response(),
        Deletion::Blocked(detail) => render(views::genres::delete(&detail)).into_response(),
    })
}

/// Genre form filled with the stored name
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre form", body = String, content_type = "text/html"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let genre = state.services.genres.get(id).await?;
    Ok(render(views::genres::form("Update Genre", &GenreForm::from(&genre), &[])))
}

/// Rename a genre
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Genre updated, redirect to its page"),
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    Ok(match state.services.genres.update(id, form).await? {
        Submission::Saved(genre) => Redirect::to(&genre.url()).into_response(),
        Submission::Rejected(rejected) => {
            render(views::genres::form("Update Genre", &rejected.form, &rejected.errors))
                .into_response()
        }
    })
}
