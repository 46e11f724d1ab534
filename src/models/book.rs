//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{self, SubmittedForm};

/// Book as stored; author and genres are references resolved at read time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book form as posted by the browser.
///
/// `genre` accepts repeated fields (checkboxes) as well as a comma separated list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    /// Author identifier
    #[validate(
        length(min = 1, message = "Author must not be empty."),
        custom(function = "crate::validation::record_id")
    )]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty."))]
    pub isbn: String,
    /// Genre identifiers
    #[validate(custom(function = "crate::validation::record_ids"))]
    pub genre: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookInput {
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
}

impl BookForm {
    /// Whether the given genre is ticked on the form
    pub fn has_genre(&self, genre_id: i32) -> bool {
        validation::parse_ids(&self.genre).contains(&genre_id)
    }

    pub fn author_id(&self) -> Option<i32> {
        validation::parse_id(&self.author)
    }
}

impl SubmittedForm for BookForm {
    type Input = BookInput;

    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            summary: self.summary.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            genre: validation::split_values(&self.genre),
        }
    }

    fn escaped(self) -> Self {
        Self {
            title: validation::escape_html(&self.title),
            author: validation::escape_html(&self.author),
            summary: validation::escape_html(&self.summary),
            isbn: validation::escape_html(&self.isbn),
            genre: self.genre.iter().map(|g| validation::escape_html(g)).collect(),
        }
    }

    fn to_input(&self) -> BookInput {
        BookInput {
            title: self.title.clone(),
            author_id: self.author_id().unwrap_or_default(),
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre_ids: validation::parse_ids(&self.genre),
        }
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::sanitize;

    fn valid_form() -> BookForm {
        BookForm {
            title: " Emma ".to_string(),
            author: "4".to_string(),
            summary: "A novel about youthful hubris.".to_string(),
            isbn: "9780141439587".to_string(),
            genre: vec!["2,5".to_string(), "5".to_string()],
        }
    }

    #[test]
    fn valid_form_becomes_input() {
        let (_, input) = sanitize(valid_form()).unwrap();
        assert_eq!(input.title, "Emma");
        assert_eq!(input.author_id, 4);
        assert_eq!(input.genre_ids, vec![2, 5]);
    }

    #[test]
    fn absent_genres_are_an_empty_set() {
        let (_, input) = sanitize(BookForm {
            genre: Vec::new(),
            ..valid_form()
        })
        .unwrap();
        assert!(input.genre_ids.is_empty());
    }

    #[test]
    fn every_required_field_is_checked() {
        let rejected = sanitize(BookForm::default()).unwrap_err();
        let fields: Vec<_> = rejected.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "author", "summary", "isbn"]);
    }

    #[test]
    fn malformed_references_are_rejected() {
        let rejected = sanitize(BookForm {
            author: "abc".to_string(),
            genre: vec!["1,x".to_string()],
            ..valid_form()
        })
        .unwrap_err();
        let fields: Vec<_> = rejected.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["author", "genre"]);
        assert_eq!(rejected.form.title, "Emma");
    }

    #[test]
    fn form_round_trips_stored_book() {
        let book = Book {
            id: 9,
            title: "Persuasion".to_string(),
            author_id: 4,
            summary: "Second chances.".to_string(),
            isbn: "9780141439686".to_string(),
            genre_ids: vec![1, 3],
        };
        let form = BookForm::from(&book);
        assert_eq!(form.author_id(), Some(4));
        assert!(form.has_genre(3));
        assert!(!form.has_genre(2));
        assert_eq!(book.url(), "/catalog/book/9");
    }
}
