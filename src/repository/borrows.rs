//! Borrow records repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowRecord, BorrowedBook},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowsRepository: Send + Sync {
    /// Insert a borrow record. Dangling user or book references are rejected.
    async fn create(
        &self,
        user_id: i32,
        book_id: i32,
        borrowed_date: DateTime<Utc>,
    ) -> AppResult<BorrowRecord>;

    /// Borrow records of one user joined with their books
    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BorrowedBook>>;
}

#[derive(Clone)]
pub struct PgBorrowsRepository {
    pool: Pool<Postgres>,
}

impl PgBorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowsRepository for PgBorrowsRepository {
    async fn create(
        &self,
        user_id: i32,
        book_id: i32,
        borrowed_date: DateTime<Utc>,
    ) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrowed_books (user_id, book_id, borrowed_date)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, book_id, borrowed_date
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(borrowed_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                match db.constraint() {
                    Some("borrowed_books_book_id_fkey") => AppError::BookNotFound,
                    _ => AppError::Unauthenticated,
                }
            }
            other => AppError::Database(other),
        })
    }

    async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BorrowedBook>> {
        let borrowed = sqlx::query_as::<_, BorrowedBook>(
            r#"
            SELECT bb.id, bb.user_id, bb.book_id, b.title, b.author, bb.borrowed_date
            FROM borrowed_books bb
            JOIN books b ON bb.book_id = b.id
            WHERE bb.user_id = $1
            ORDER BY bb.borrowed_date DESC NULLS LAST, bb.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(borrowed)
    }
}
