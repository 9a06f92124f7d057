//! Borrowing service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowRecord, BorrowedBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowingService {
    repository: Repository,
}

impl BorrowingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow records of a user, with book title and author
    pub async fn list_borrowed_books(&self, user_id: i32) -> AppResult<Vec<BorrowedBook>> {
        self.repository.borrows.list_for_user(user_id).await
    }

    /// Record that `user_id` borrowed `book_id` now.
    ///
    /// Remaining copies are neither checked nor decremented.
    pub async fn borrow_book(&self, user_id: i32, book_id: i32) -> AppResult<BorrowRecord> {
        let book = self
            .repository
            .books
            .get_by_id(book_id)
            .await?
            .ok_or(AppError::BookNotFound)?;

        let record = self
            .repository
            .borrows
            .create(user_id, book.id, Utc::now())
            .await?;

        tracing::info!(
            "User id={} borrowed book id={} (record id={})",
            user_id,
            book.id,
            record.id
        );
        Ok(record)
    }
}
