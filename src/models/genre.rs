//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{self, SubmittedForm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Genre form as posted by the browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct GenreForm {
    #[validate(length(min = 3, max = 100, message = "Genre name must be between 3 and 100 characters."))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreInput {
    pub name: String,
}

impl SubmittedForm for GenreForm {
    type Input = GenreInput;

    const FIELDS: &'static [&'static str] = &["name"];

    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }

    fn escaped(self) -> Self {
        Self {
            name: validation::escape_html(&self.name),
        }
    }

    fn to_input(&self) -> GenreInput {
        GenreInput {
            name: self.name.clone(),
        }
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}
