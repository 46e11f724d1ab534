//! Genre pages

use maud::{html, Markup};

use super::{errors, page, stored};
use crate::{
    models::{Book, Genre, GenreForm},
    services::genres::GenreDetail,
    validation::FieldError,
};

pub fn list(genres: &[Genre]) -> Markup {
    page(
        "Genre List",
        html! {
            @if genres.is_empty() {
                p { "There are no genres." }
            } @else {
                ul {
                    @for genre in genres {
                        li { a href=(genre.url()) { (stored(&genre.name)) } }
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
            p { "This genre has no books." }
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

pub fn detail(detail: &GenreDetail) -> Markup {
    let genre = &detail.genre;
    page(
        &format!("Genre: {}", genre.name),
        html! {
            (books(&detail.books))
            hr;
            p {
                a href=(format!("{}/delete", genre.url())) { "Delete genre" }
                " | "
                a href=(format!("{}/update", genre.url())) { "Update genre" }
            }
        },
    )
}

pub fn form(title: &str, form: &GenreForm, problems: &[FieldError]) -> Markup {
    page(
        title,
        html! {
            form method="POST" {
                div {
                    label for="name" { "Genre:" }
                    input #name type="text" name="name" placeholder="Fantasy, Poetry etc."
                        required value=(stored(&form.name));
                }
                button type="submit" { "Submit" }
            }
            (errors(problems))
        },
    )
}

/// Confirmation page, or the blocking page while books remain
pub fn delete(detail: &GenreDetail) -> Markup {
    let genre = &detail.genre;
    page(
        &format!("Delete Genre: {}", genre.name),
        html! {
            @if detail.books.is_empty() {
                p { "Do you really want to delete this genre?" }
                form method="POST" {
                    input type="hidden" name="genreid" value=(genre.id);
                    button type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following books before attempting to delete this genre." } }
                (books(&detail.books))
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{book, genre};

    #[test]
    fn detail_lists_books() {
        let html = detail(&GenreDetail {
            genre: genre(1, "Romance"),
            books: vec![book(3, 1)],
        })
        .into_string();
        assert!(html.contains("<h1>Genre: Romance</h1>"));
        assert!(html.contains(r#"<dt><a href="/catalog/book/3">Emma</a></dt>"#));
    }

    #[test]
    fn empty_genre_can_be_deleted() {
        let html = delete(&GenreDetail {
            genre: genre(1, "Romance"),
            books: vec![],
        })
        .into_string();
        assert!(html.contains("Do you really want to delete this genre?"));
        assert!(html.contains(r#"<form method="POST">"#));
    }
}
