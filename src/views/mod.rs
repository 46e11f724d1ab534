//! HTML views
//!
//! Free text is HTML-escaped before it is stored, so stored values and
//! sanitized form values are emitted through [`stored`] instead of being
//! escaped a second time. Everything else goes through maud's escaping.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod error;
pub mod genres;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::validation::FieldError;

/// Emit text that was escaped when it was sanitized
pub fn stored(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

/// Page layout with the catalog navigation.
///
/// `title` is emitted as is and must already be escaped.
pub fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (stored(title)) }
            }
            body {
                nav {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/books" { "All books" } }
                        li { a href="/catalog/authors" { "All authors" } }
                        li { a href="/catalog/genres" { "All genres" } }
                        li { a href="/catalog/bookinstances" { "All book-instances" } }
                    }
                    hr;
                    ul {
                        li { a href="/catalog/author/create" { "Create new author" } }
                        li { a href="/catalog/genre/create" { "Create new genre" } }
                        li { a href="/catalog/book/create" { "Create new book" } }
                        li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
                    }
                }
                main {
                    h1 { (stored(title)) }
                    (content)
                }
            }
        }
    }
}

/// Validation messages shown under a rejected form
pub fn errors(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for error in errors {
                    li data-field=(error.field) { (error.message) }
                }
            }
        }
    }
}
