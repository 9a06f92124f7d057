//! Data models for the library

pub mod book;
pub mod borrow;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, NewBook};
pub use borrow::{BorrowRecord, BorrowedBook};
pub use user::{Credentials, NewUser, Registration, SessionData, User};
