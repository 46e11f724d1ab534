//! Form validation and sanitization
//!
//! Submitted forms go through the same three steps: trim every text field,
//! run the `validator` rules, then HTML-escape the text before it is stored or
//! shown again. Rule violations are reported in form field order.

use std::borrow::Cow;

use chrono::NaiveDate;
use maud::html;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::book_instance::BookStatus;

/// Longest accepted person name
pub const MAX_NAME_LEN: usize = 100;

/// One failed rule for one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A submitted form that failed validation, kept so it can be shown again
#[derive(Debug, Clone)]
pub struct Rejected<F> {
    pub form: F,
    pub errors: Vec<FieldError>,
}

/// A form posted by the browser that turns into a storable input once valid
pub trait SubmittedForm: Validate + Sized {
    type Input;

    /// Field names in the order they appear on the form
    const FIELDS: &'static [&'static str];

    fn trimmed(self) -> Self;

    fn escaped(self) -> Self;

    /// Only called once the form passed validation
    fn to_input(&self) -> Self::Input;
}

/// Trim, validate and escape a submitted form.
///
/// On success returns the sanitized form together with the input to persist.
pub fn sanitize<F: SubmittedForm>(form: F) -> Result<(F, F::Input), Rejected<F>> {
    let form = form.trimmed();
    let outcome = form.validate();
    let form = form.escaped();

    match outcome {
        Ok(()) => {
            let input = form.to_input();
            Ok((form, input))
        }
        Err(errors) => Err(Rejected {
            errors: ordered_errors(&errors, F::FIELDS),
            form,
        }),
    }
}

/// Flatten `validator` errors following the given field order
pub fn ordered_errors(errors: &ValidationErrors, fields: &[&'static str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut ordered = Vec::new();

    for field in fields {
        let Some(list) = by_field.get(*field) else {
            continue;
        };
        for error in list.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid.", field.replace('_', " ")));
            ordered.push(FieldError::new(field, message));
        }
    }

    ordered
}

/// Escape text for safe inclusion in HTML
pub fn escape_html(value: &str) -> String {
    html! { (value) }.into_string()
}

/// Parse a `YYYY-MM-DD` date; empty input is no date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parse a record identifier (positive integer)
pub fn parse_id(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|id| *id > 0)
}

/// Split multi-value fields that may arrive repeated and/or comma-delimited
pub fn split_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Parse a list of identifiers into a de-duplicated set, keeping first-seen order
pub fn parse_ids(values: &[String]) -> Vec<i32> {
    let mut ids = Vec::new();
    for id in split_values(values).iter().filter_map(|v| parse_id(v)) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

// ---------------------------------------------------------------------------
// Custom rules used by the form derives
// ---------------------------------------------------------------------------

pub fn person_name(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_NAME_LEN {
        return Err(failure("too_long", "Name must be at most 100 characters."));
    }
    Ok(())
}

/// Family names: letters, digits, whitespace, hyphens, apostrophes and periods
pub fn family_name(value: &str) -> Result<(), ValidationError> {
    person_name(value)?;
    let allowed = |c: char| {
        c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '\'' | '’' | '.')
    };
    if !value.chars().all(allowed) {
        return Err(failure(
            "family_name_chars",
            "Family name may only contain letters, digits, spaces, hyphens, apostrophes and periods.",
        ));
    }
    Ok(())
}

pub fn optional_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_date(value).is_some() {
        return Ok(());
    }
    Err(failure("date", "Invalid date."))
}

pub fn record_id(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || parse_id(value).is_some() {
        return Ok(());
    }
    Err(failure("record_id", "Invalid selection."))
}

pub fn record_ids(values: &[String]) -> Result<(), ValidationError> {
    if split_values(values).iter().all(|v| parse_id(v).is_some()) {
        return Ok(());
    }
    Err(failure("record_ids", "Invalid genre selection."))
}

pub fn book_status(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.trim().parse::<BookStatus>().is_ok() {
        return Ok(());
    }
    Err(failure(
        "status",
        "Status must be one of Available, Maintenance, Loaned or Reserved.",
    ))
}
