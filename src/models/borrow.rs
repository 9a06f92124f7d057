//! Borrow record model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrow record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub borrowed_date: Option<DateTime<Utc>>,
}

/// Borrow record joined with the borrowed book for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowedBook {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub title: String,
    pub author: String,
    /// Missing or unreadable timestamps are shown as null
    pub borrowed_date: Option<DateTime<Utc>>,
}
