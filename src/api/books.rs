//! Book pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;

use crate::{
    error::AppResult,
    models::BookForm,
    services::{Deletion, Submission},
    views, AppState,
};

use super::{render, RecordId};

/// List all books with their authors
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list page", body = String, content_type = "text/html")
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let entries = state.services.books.list().await?;
    Ok(render(views::books::list(&entries)))
}

/// Book with its author, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book detail page", body = String, content_type = "text/html"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.books.detail(id).await?;
    Ok(render(views::books::detail(&detail)))
}

/// Empty book form with all authors and genres
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses(
        (status = 200, description = "Book form", body = String, content_type = "text/html")
    )
)]
pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let options = state.services.books.options().await?;
    Ok(render(views::books::form(
        "Create Book",
        &BookForm::default(),
        &options,
        &[],
    )))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book created, redirect to its page"),
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    Ok(match state.services.books.create(form).await? {
        Submission::Saved(book) => Redirect::to(&book.url()).into_response(),
        Submission::Rejected(rejected) => {
            let options = state.services.books.options().await?;
            render(views::books::form(
                "Create Book",
                &rejected.form,
                &options,
                &rejected.errors,
            ))
            .into_response()
        }
    })
}

/// Delete confirmation, or the list of copies blocking the delete
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Delete page", body = String, content_type = "text/html"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let detail = state.services.books.detail(id).await?;
    Ok(render(views::books::delete(&detail)))
}

/// Delete a book without copies
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Book deleted, redirect to the list"),
        (status = 200, description = "Book still has copies", body = String, content_type = "text/html"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Response> {
    Ok(match state.services.books.delete(id).await? {
        Deletion::Deleted => Redirect::to("/catalog/books").into_response(),
        Deletion::Blocked(detail) => render(views::books::delete(&detail)).into_response(),
    })
}

/// Book form filled with the stored values
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form", body = String, content_type = "text/html"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book_form(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Html<String>> {
    let (form, options) = state.services.books.edit(id).await?;
    Ok(render(views::books::form("Update Book", &form, &options, &[])))
}

/// Update a book and replace its genres
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book updated, redirect to its page"),
        (status = 200, description = "Form shown again with errors", body = String, content_type = "text/html"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    Ok(match state.services.books.update(id, form).await? {
        Submission::Saved(book) => Redirect::to(&book.url()).into_response(),
        Submission::Rejected(rejected) => {
            let options = state.services.books.options().await?;
            render(views::books::form(
                "Update Book",
                &rejected.form,
                &options,
                &rejected.errors,
            ))
            .into_response()
        }
    })
}
