//! Book instance domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, BookInstanceInput, BookStatus},
};

const INSTANCE_COLUMNS: &str = "bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back";

impl Repository {
    /// List all copies, grouped by book title
    pub async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(&format!(
            r#"
            SELECT {INSTANCE_COLUMNS}
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            ORDER BY b.title, bi.id
            "#
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get book instance by ID
    pub async fn book_instances_get_by_id(&self, id: i32) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {INSTANCE_COLUMNS} FROM book_instances bi WHERE bi.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Copies of one book
    pub async fn book_instances_list_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(&format!(
            "SELECT {INSTANCE_COLUMNS} FROM book_instances bi WHERE bi.book_id = $1 ORDER BY bi.id"
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create book instance
    pub async fn book_instances_create(&self, data: &BookInstanceInput) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Replace every editable field of a book instance
    pub async fn book_instances_update(&self, id: i32, data: &BookInstanceInput) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $1, imprint = $2, status = $3, due_back = $4
            WHERE id = $5
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Delete book instance
    pub async fn book_instances_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }

    /// Count copies, optionally only those with the given status
    pub async fn book_instances_count(&self, status: Option<BookStatus>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE $1::text IS NULL OR status = $1",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
