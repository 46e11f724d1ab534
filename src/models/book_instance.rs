//! Book instance (physical copy) model

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

use super::format_date;
use crate::validation::{self, SubmittedForm};

/// Availability of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

#[derive(Debug, Error)]
#[error("Unknown book status: {0}")]
pub struct UnknownStatus(pub String);

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Available,
        BookStatus::Maintenance,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl FromStr for BookStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for BookStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Book instance record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    #[sqlx(try_from = "String")]
    pub status: BookStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_date(self.due_back.date_naive())
    }
}

/// Book instance form as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookInstanceForm {
    /// Book identifier
    #[validate(
        length(min = 1, message = "Book must be specified."),
        custom(function = "crate::validation::record_id")
    )]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified."))]
    pub imprint: String,
    /// Empty means `Maintenance`
    #[validate(custom(function = "crate::validation::book_status"))]
    pub status: String,
    /// `YYYY-MM-DD`; empty means now
    #[validate(custom(function = "crate::validation::optional_date"))]
    pub due_back: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookInstanceInput {
    pub book_id: i32,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstanceForm {
    pub fn book_id(&self) -> Option<i32> {
        validation::parse_id(&self.book)
    }
}

impl SubmittedForm for BookInstanceForm {
    type Input = BookInstanceInput;

    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn trimmed(self) -> Self {
        Self {
            book: self.book.trim().to_string(),
            imprint: self.imprint.trim().to_string(),
            status: self.status.trim().to_string(),
            due_back: self.due_back.trim().to_string(),
        }
    }

    fn escaped(self) -> Self {
        Self {
            book: validation::escape_html(&self.book),
            imprint: validation::escape_html(&self.imprint),
            status: validation::escape_html(&self.status),
            ..self
        }
    }

    fn to_input(&self) -> BookInstanceInput {
        let due_back = validation::parse_date(&self.due_back)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .unwrap_or_else(Utc::now);

        BookInstanceInput {
            book_id: self.book_id().unwrap_or_default(),
            imprint: self.imprint.clone(),
            status: self.status.parse().unwrap_or_default(),
            due_back,
        }
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: instance.due_back.date_naive().to_string(),
        }
    }
}
