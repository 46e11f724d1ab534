//! Book pages

use maud::{html, Markup};

use super::{errors, page, stored};
use crate::{
    models::{BookForm, BookInstance, BookStatus},
    services::books::{BookDetail, BookEntry, BookOptions},
    validation::FieldError,
};

pub fn list(entries: &[BookEntry]) -> Markup {
    page(
        "Book List",
        html! {
            @if entries.is_empty() {
                p { "There are no books." }
            } @else {
                ul {
                    @for entry in entries {
                        li {
                            a href=(entry.book.url()) { (stored(&entry.book.title)) }
                            @if let Some(author) = &entry.author {
                                " (" (stored(&author.name())) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

fn status_class(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Available => "text-success",
        BookStatus::Maintenance => "text-danger",
        BookStatus::Loaned | BookStatus::Reserved => "text-warning",
    }
}

fn copies(instances: &[BookInstance]) -> Markup {
    html! {
        h2 { "Copies" }
        @if instances.is_empty() {
            p { "There are no copies of this book in the library." }
        }
        @for instance in instances {
            hr;
            p class=(status_class(instance.status)) { (instance.status) }
            p { strong { "Imprint:" } " " (stored(&instance.imprint)) }
            @if instance.status != BookStatus::Available {
                p { strong { "Due back:" } " " (instance.due_back_formatted()) }
            }
            p { strong { "Id:" } " " a href=(instance.url()) { (instance.id) } }
        }
    }
}

pub fn detail(detail: &BookDetail) -> Markup {
    let book = &detail.book;
    page(
        &format!("Title: {}", book.title),
        html! {
            p {
                strong { "Author:" } " "
                a href=(detail.author.url()) { (stored(&detail.author.name())) }
            }
            p { strong { "Summary:" } " " (stored(&book.summary)) }
            p { strong { "ISBN:" } " " (stored(&book.isbn)) }
            p {
                strong { "Genre:" } " "
                @for (i, genre) in detail.genres.iter().enumerate() {
                    @if i > 0 { ", " }
                    a href=(genre.url()) { (stored(&genre.name)) }
                }
            }
            (copies(&detail.instances))
            hr;
            p {
                a href=(format!("{}/delete", book.url())) { "Delete book" }
                " | "
                a href=(format!("{}/update", book.url())) { "Update book" }
            }
        },
    )
}

/// Create and update form with the author and genre choices
pub fn form(title: &str, form: &BookForm, options: &BookOptions, problems: &[FieldError]) -> Markup {
    let selected_author = form.author_id();
    page(
        title,
        html! {
            form method="POST" {
                div {
                    label for="title" { "Title:" }
                    input #title type="text" name="title" placeholder="Name of book"
                        required value=(stored(&form.title));
                }
                div {
                    label for="author" { "Author:" }
                    select #author name="author" required {
                        option value="" { "--Please select an author--" }
                        @for author in &options.authors {
                            option value=(author.id) selected[selected_author == Some(author.id)] {
                                (stored(&author.name()))
                            }
                        }
                    }
                }
                div {
                    label for="summary" { "Summary:" }
                    textarea #summary name="summary" placeholder="Summary" required {
                        (stored(&form.summary))
                    }
                }
                div {
                    label for="isbn" { "ISBN:" }
                    input #isbn type="text" name="isbn" placeholder="ISBN13"
                        required value=(stored(&form.isbn));
                }
                div {
                    label { "Genre:" }
                    @for genre in &options.genres {
                        @let id = format!("genre-{}", genre.id);
                        div {
                            input type="checkbox" name="genre" id=(id) value=(genre.id)
                                checked[form.has_genre(genre.id)];
                            label for=(id) { (stored(&genre.name)) }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            (errors(problems))
        },
    )
}

/// Confirmation page, or the blocking page while copies remain
pub fn delete(detail: &BookDetail) -> Markup {
    let book = &detail.book;
    page(
        &format!("Delete Book: {}", book.title),
        html! {
            p {
                strong { "Author:" } " "
                a href=(detail.author.url()) { (stored(&detail.author.name())) }
            }
            @if detail.instances.is_empty() {
                p { "Do you really want to delete this book?" }
                form method="POST" {
                    input type="hidden" name="bookid" value=(book.id);
                    button type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following copies before attempting to delete this book." } }
                (copies(&detail.instances))
            }
        },
    )
}
