//! Library Management Server
//!
//! Members register and log in, browse the book catalog and borrow books.
//! Borrow records are kept per member. Pages answer with JSON view models;
//! form posts redirect and leave a notice in the session.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
