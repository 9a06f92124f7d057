//! Catalog management service

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book of the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Validate and insert a book, returning its id
    pub async fn add_book(&self, form: CreateBook) -> AppResult<i32> {
        let book = NewBook::try_from(form)?;
        let id = self.repository.books.create(&book).await?;
        tracing::info!("Added book id={} title={:?}", id, book.title);
        Ok(id)
    }

    /// Number of books in the catalog
    pub async fn count_books(&self) -> AppResult<i64> {
        self.repository.books.count().await
    }
}
