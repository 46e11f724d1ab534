//! Author domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorInput},
};

const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";

impl Repository {
    /// List all authors, family name first
    pub async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY family_name, first_name, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn authors_get_by_id(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Create author
    pub async fn authors_create(&self, data: &AuthorInput) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(&format!(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING {AUTHOR_COLUMNS}
            "#
        ))
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every editable field of an author
    pub async fn authors_update(&self, id: i32, data: &AuthorInput) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE authors
            SET first_name = $1, family_name = $2, date_of_birth = $3, date_of_death = $4
            WHERE id = $5
            RETURNING {AUTHOR_COLUMNS}
            "#
        ))
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Delete author
    pub async fn authors_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }

    pub async fn authors_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
