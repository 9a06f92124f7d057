//! Business logic services

pub mod auth;
pub mod borrowing;
pub mod catalog;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub borrowing: borrowing::BorrowingService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            borrowing: borrowing::BorrowingService::new(repository),
        }
    }
}
