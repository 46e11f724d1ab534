//! Author pages

use maud::{html, Markup};

use super::{errors, page, stored};
use crate::{
    models::{Author, AuthorForm, Book},
    services::authors::AuthorDetail,
    validation::FieldError,
};

pub fn list(authors: &[Author]) -> Markup {
    page(
        "Author List",
        html! {
            @if authors.is_empty() {
                p { "There are no authors." }
            } @else {
                ul {
                    @for author in authors {
                        li {
                            a href=(author.url()) { (stored(&author.name())) }
                            @let lifespan = author.lifespan();
                            @if !lifespan.is_empty() {
                                " (" (lifespan) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

fn books(books: &[Book]) -> Markup {
    html! {
        h2 { "Books" }
        @if books.is_empty() {
            p { "This author has no books." }
        } @else {
            dl {
                @for book in books {
                    dt { a href=(book.url()) { (stored(&book.title)) } }
                    dd { (stored(&book.summary)) }
                }
            }
        }
    }
}

pub fn detail(detail: &AuthorDetail) -> Markup {
    let author = &detail.author;
    page(
        &format!("Author: {}", author.name()),
        html! {
            p { (author.lifespan()) }
            (books(&detail.books))
            hr;
            p {
                a href=(format!("{}/delete", author.url())) { "Delete author" }
                " | "
                a href=(format!("{}/update", author.url())) { "Update author" }
            }
        },
    )
}

/// Create and update form; values are sanitized or stored text
pub fn form(title: &str, form: &AuthorForm, problems: &[FieldError]) -> Markup {
    page(
        title,
        html! {
            form method="POST" {
                div {
                    label for="first_name" { "First Name:" }
                    input #first_name type="text" name="first_name" placeholder="First name"
                        required value=(stored(&form.first_name));
                    label for="family_name" { "Family Name:" }
                    input #family_name type="text" name="family_name" placeholder="Family name"
                        required value=(stored(&form.family_name));
                }
                div {
                    label for="date_of_birth" { "Date of birth:" }
                    input #date_of_birth type="date" name="date_of_birth" value=(form.date_of_birth);
                }
                div {
                    label for="date_of_death" { "Date of death:" }
                    input #date_of_death type="date" name="date_of_death" value=(form.date_of_death);
                }
                button type="submit" { "Submit" }
            }
            (errors(problems))
        },
    )
}

/// Confirmation page, or the blocking page while books remain
pub fn delete(detail: &AuthorDetail) -> Markup {
    let author = &detail.author;
    page(
        &format!("Delete Author: {}", author.name()),
        html! {
            p { (author.lifespan()) }
            @if detail.books.is_empty() {
                p { "Do you really want to delete this author?" }
                form method="POST" {
                    input type="hidden" name="authorid" value=(author.id);
                    button type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following books before attempting to delete this author." } }
                (books(&detail.books))
            }
        },
    )
}
