//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::{Datelike, NaiveDate};

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorInput};
pub use book::{Book, BookForm, BookInput};
pub use book_instance::{BookInstance, BookInstanceForm, BookInstanceInput, BookStatus};
pub use genre::{Genre, GenreForm, GenreInput};

/// Human readable date, e.g. `Dec 16th, 1775`
pub fn format_date(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%b"), day, suffix, date.year())
}
