//! Repository layer for database operations

pub mod books;
pub mod borrows;
pub mod users;

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub use books::{BooksRepository, PgBooksRepository};
pub use borrows::{BorrowsRepository, PgBorrowsRepository};
pub use users::{PgUsersRepository, UsersRepository};

/// Main repository struct holding one store per table
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UsersRepository>,
    pub books: Arc<dyn BooksRepository>,
    pub borrows: Arc<dyn BorrowsRepository>,
}

impl Repository {
    /// Create a repository backed by the given PostgreSQL pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(PgUsersRepository::new(pool.clone())),
            books: Arc::new(PgBooksRepository::new(pool.clone())),
            borrows: Arc::new(PgBorrowsRepository::new(pool)),
        }
    }

    /// Assemble a repository from arbitrary stores
    pub fn from_parts(
        users: Arc<dyn UsersRepository>,
        books: Arc<dyn BooksRepository>,
        borrows: Arc<dyn BorrowsRepository>,
    ) -> Self {
        Self {
            users,
            books,
            borrows,
        }
    }
}
