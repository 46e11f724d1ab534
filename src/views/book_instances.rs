//! Book instance (copy) pages

use maud::{html, Markup};

use super::{errors, page, stored};
use crate::{
    models::{Book, BookInstanceForm, BookStatus},
    services::book_instances::{BookInstanceDetail, BookInstanceEntry},
    validation::FieldError,
};

pub fn list(entries: &[BookInstanceEntry]) -> Markup {
    page(
        "Book Instance List",
        html! {
            @if entries.is_empty() {
                p { "There are no book copies in this library." }
            } @else {
                ul {
                    @for entry in entries {
                        @let instance = &entry.instance;
                        li {
                            a href=(instance.url()) {
                                @if let Some(book) = &entry.book {
                                    (stored(&book.title)) " : "
                                }
                                (stored(&instance.imprint))
                            }
                            " - " (instance.status)
                            @if instance.status != BookStatus::Available {
                                " (Due: " (instance.due_back_formatted()) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

fn summary(detail: &BookInstanceDetail) -> Markup {
    let instance = &detail.instance;
    html! {
        p { strong { "Title:" } " " a href=(detail.book.url()) { (stored(&detail.book.title)) } }
        p { strong { "Imprint:" } " " (stored(&instance.imprint)) }
        p { strong { "Status:" } " " (instance.status) }
        @if instance.status != BookStatus::Available {
            p { strong { "Due back:" } " " (instance.due_back_formatted()) }
        }
    }
}

pub fn detail(detail: &BookInstanceDetail) -> Markup {
    let url = detail.instance.url();
    page(
        &format!("ID: {}", detail.instance.id),
        html! {
            (summary(detail))
            hr;
            p {
                a href=(format!("{}/delete", url)) { "Delete BookInstance" }
                " | "
                a href=(format!("{}/update", url)) { "Update BookInstance" }
            }
        },
    )
}

/// Create and update form with the books to choose from
pub fn form(title: &str, form: &BookInstanceForm, books: &[Book], problems: &[FieldError]) -> Markup {
    let selected_book = form.book_id();
    let selected_status = form.status.parse::<BookStatus>().unwrap_or_default();
    page(
        title,
        html! {
            form method="POST" {
                div {
                    label for="book" { "Book:" }
                    select #book name="book" required {
                        option value="" { "--Please select a book--" }
                        @for book in books {
                            option value=(book.id) selected[selected_book == Some(book.id)] {
                                (stored(&book.title))
                            }
                        }
                    }
                }
                div {
                    label for="imprint" { "Imprint:" }
                    input #imprint type="text" name="imprint" placeholder="Publisher and date information"
                        required value=(stored(&form.imprint));
                }
                div {
                    label for="due_back" { "Date when book available:" }
                    input #due_back type="date" name="due_back" value=(form.due_back);
                }
                div {
                    label for="status" { "Status:" }
                    select #status name="status" {
                        @for status in BookStatus::ALL {
                            option value=(status) selected[status == selected_status] { (status) }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            (errors(problems))
        },
    )
}

pub fn delete(detail: &BookInstanceDetail) -> Markup {
    page(
        "Delete BookInstance",
        html! {
            p { "Do you really want to delete this BookInstance?" }
            (summary(detail))
            form method="POST" {
                input type="hidden" name="id" value=(detail.instance.id);
                button type="submit" { "Delete" }
            }
        },
    )
}
