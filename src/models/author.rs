//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::format_date;
use crate::validation::{self, SubmittedForm};

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// Display name, family name first
    pub fn name(&self) -> String {
        format!("{} , {}", self.family_name, self.first_name)
    }

    /// Birth and death dates, e.g. `Dec 16th, 1775 - Jul 18th, 1817`
    pub fn lifespan(&self) -> String {
        match (self.date_of_birth, self.date_of_death) {
            (None, None) => String::new(),
            (birth, death) => format!(
                "{} - {}",
                birth.map(format_date).unwrap_or_default(),
                death.map(format_date).unwrap_or_default()
            )
            .trim()
            .to_string(),
        }
    }
}

/// Author form as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct AuthorForm {
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(function = "crate::validation::person_name")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(function = "crate::validation::family_name")
    )]
    pub family_name: String,
    /// `YYYY-MM-DD`, optional
    #[validate(custom(function = "crate::validation::optional_date"))]
    pub date_of_birth: String,
    /// `YYYY-MM-DD`, optional
    #[validate(custom(function = "crate::validation::optional_date"))]
    pub date_of_death: String,
}

/// Sanitized author fields ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl SubmittedForm for AuthorForm {
    type Input = AuthorInput;

    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            family_name: self.family_name.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }

    fn escaped(self) -> Self {
        Self {
            first_name: validation::escape_html(&self.first_name),
            family_name: validation::escape_html(&self.family_name),
            ..self
        }
    }

    fn to_input(&self) -> AuthorInput {
        AuthorInput {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: validation::parse_date(&self.date_of_birth),
            date_of_death: validation::parse_date(&self.date_of_death),
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
            date_of_death: author.date_of_death.map(|d| d.to_string()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::sanitize;

    fn form(first: &str, family: &str) -> AuthorForm {
        AuthorForm {
            first_name: first.to_string(),
            family_name: family.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn derived_values() {
        let author = Author {
            id: 7,
            first_name: "Jane".to_string(),
            family_name: "Austen".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1775, 12, 16),
            date_of_death: NaiveDate::from_ymd_opt(1817, 7, 18),
        };
        assert_eq!(author.url(), "/catalog/author/7");
        assert_eq!(author.name(), "Austen , Jane");
        assert_eq!(author.lifespan(), "Dec 16th, 1775 - Jul 18th, 1817");

        let unknown = Author {
            date_of_birth: None,
            date_of_death: None,
            ..author
        };
        assert_eq!(unknown.lifespan(), "");
    }

    #[test]
    fn valid_form_is_trimmed_and_parsed() {
        let submitted = AuthorForm {
            date_of_birth: " 1775-12-16 ".to_string(),
            ..form("  Jane ", " Austen")
        };
        let (_, input) = sanitize(submitted).unwrap();
        assert_eq!(input.first_name, "Jane");
        assert_eq!(input.family_name, "Austen");
        assert_eq!(input.date_of_birth, NaiveDate::from_ymd_opt(1775, 12, 16));
        assert_eq!(input.date_of_death, None);
    }

    #[test]
    fn missing_names_are_reported_in_field_order() {
        let rejected = sanitize(form("   ", "")).unwrap_err();
        let fields: Vec<_> = rejected.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["first_name", "family_name"]);
        assert_eq!(rejected.errors[0].message, "First name must be specified.");
    }

    #[test]
    fn rejected_form_keeps_other_values() {
        let submitted = AuthorForm {
            date_of_birth: "not a date".to_string(),
            ..form("Jane", "Austen")
        };
        let rejected = sanitize(submitted).unwrap_err();
        assert_eq!(rejected.errors.len(), 1);
        assert_eq!(rejected.errors[0].field, "date_of_birth");
        assert_eq!(rejected.form.first_name, "Jane");
        assert_eq!(rejected.form.family_name, "Austen");
    }

    #[test]
    fn names_are_escaped_before_storage() {
        let (sanitized, input) = sanitize(form("Jane <i>", "Austen")).unwrap();
        assert_eq!(input.first_name, "Jane &lt;i&gt;");
        assert_eq!(sanitized.first_name, "Jane &lt;i&gt;");
    }
}
