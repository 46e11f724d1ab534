//! Catalog home page

use maud::{html, Markup};

use super::page;
use crate::services::catalog::CatalogCounts;

pub fn index(counts: &CatalogCounts) -> Markup {
    page(
        "Local Library Home",
        html! {
            p { "Welcome to the Local Library catalog." }
            h2 { "Dynamic content" }
            p { "The library has the following record counts:" }
            ul {
                li { strong { "Books:" } " " (counts.books) }
                li { strong { "Copies:" } " " (counts.book_instances) }
                li { strong { "Copies available:" } " " (counts.book_instances_available) }
                li { strong { "Authors:" } " " (counts.authors) }
                li { strong { "Genres:" } " " (counts.genres) }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_every_count() {
        let html = index(&CatalogCounts {
            books: 4,
            book_instances: 9,
            book_instances_available: 3,
            authors: 2,
            genres: 5,
        })
        .into_string();

        assert!(html.contains("<strong>Copies available:</strong> 3"));
        assert!(html.contains("<strong>Genres:</strong> 5"));
    }
}
