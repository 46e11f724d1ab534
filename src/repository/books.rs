//! Book domain methods on Repository.
//!
//! Genre links live in the `book_genres` junction table and are loaded with
//! every book as an array of genre IDs.

use sqlx::{Postgres, Transaction};

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput},
};

const BOOK_SELECT: &str = r#"
    SELECT b.id, b.title, b.author_id, b.summary, b.isbn,
           ARRAY(
               SELECT bg.genre_id FROM book_genres bg
               WHERE bg.book_id = b.id
               ORDER BY bg.genre_id
           ) AS genre_ids
    FROM books b
"#;

impl Repository {
    /// List all books by title
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!("{BOOK_SELECT} ORDER BY b.title, b.id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("{BOOK_SELECT} WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Books written by an author
    pub async fn books_list_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "{BOOK_SELECT} WHERE b.author_id = $1 ORDER BY b.title, b.id"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Books tagged with a genre
    pub async fn books_list_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            r#"{BOOK_SELECT}
            WHERE EXISTS (
                SELECT 1 FROM book_genres bg WHERE bg.book_id = b.id AND bg.genre_id = $1
            )
            ORDER BY b.title, b.id"#
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a book and its genre links in one transaction
    pub async fn books_create(&self, data: &BookInput) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .fetch_one(&mut *tx)
        .await?;

        link_genres(&mut tx, id, &data.genre_ids).await?;
        tx.commit().await?;

        tracing::debug!("Book {} created with {} genre(s)", id, data.genre_ids.len());
        self.books_get_by_id(id).await
    }

    /// Replace every editable field of a book, genre links included
    pub async fn books_update(&self, id: i32, data: &BookInput) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE books
            SET title = $1, author_id = $2, summary = $3, isbn = $4
            WHERE id = $5
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(data.author_id)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_genres(&mut tx, id, &data.genre_ids).await?;
        tx.commit().await?;

        self.books_get_by_id(id).await
    }

    /// Delete book (genre links cascade)
    pub async fn books_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    pub async fn books_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

async fn link_genres(
    tx: &mut Transaction<'_, Postgres>,
    book_id: i32,
    genre_ids: &[i32],
) -> AppResult<()> {
    if genre_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        r#"
        INSERT INTO book_genres (book_id, genre_id)
        SELECT $1, UNNEST($2::int4[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(book_id)
    .bind(genre_ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
