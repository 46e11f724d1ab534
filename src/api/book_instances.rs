//! Book instance (copy) pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{error::AppResult, models::BookInstanceForm, services::Submission, views, AppState};

use super::{render, RecordId};

/// List all copies with their book titles
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Book instance list page", body = String, content_type = "text/html")
    )
)]
pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Html<String>> {
    let entries = state.services.book_instances.list().await?;
    Ok(render(views::book_instances::list(&entries)))
}

/// Copy with its book
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Book instance detail page", body = String, content_type = "text/html"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.book_instances.detail(id).await?;
    Ok(render(views::book_instances::detail(&detail)))
}

/// Empty copy form with all books
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Book instance form", body = String, content_type = "text/html")
    )
)]
pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.options().await?;
    Ok(render(views::book_instances::form(
        "Create BookInstance",
        &BookInstanceForm::default(),
        &books,
        &[],
    )))
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book instance created, redirect to its page"),
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html")
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    Ok(match state.services.book_instances.create(form).await? {
        Submission::Saved(instance) => Redirect::to(&instance.url()).into_response(),
        Submission::Rejected(rejected) => {
            let books = state.services.book_instances.options().await?;
            render(views::book_instances::form(
                "Create BookInstance",
                &rejected.form,
                &books,
                &rejected.errors,
            ))
            .into_response()
        }
    })
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Delete page", body = String, content_type = "text/html"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.book_instances.detail(id).await?;
    Ok(render(views::book_instances::delete(&detail)))
}

/// Delete a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 303, description = "Book instance deleted, redirect to the list"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Redirect> {
    state.services.book_instances.delete(id).await?;
    Ok(Redirect::to("/catalog/bookinstances"))
}

/// Copy form filled with the stored values
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Book instance form", body = String, content_type = "text/html"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn update_book_instance_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (form, books) = state.services.book_instances.edit(id).await?;
    Ok(render(views::book_instances::form(
        "Update BookInstance",
        &form,
        &books,
        &[],
    )))
}

/// Update a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book instance updated, redirect to its page"),
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html"),
        (status = 404, description = "Book instance not found")
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    Ok(match state.services.book_instances.update(id, form).await? {
        Submission::Saved(instance) => Redirect::to(&instance.url()).into_response(),
        Submission::Rejected(rejected) => {
            let books = state.services.book_instances.options().await?;
            render(views::book_instances::form(
                "Update BookInstance",
                &rejected.form,
                &books,
                &rejected.errors,
            ))
            .into_response()
        }
    })
}
