//! HTTP handlers and router

pub mod auth;
pub mod books;
pub mod borrowing;
pub mod health;
pub mod openapi;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tower_sessions::SessionStore;

use crate::{session::session_layer, AppState};

/// Create the application router with all routes; page routes keep their sessions in `store`
pub fn create_router<Store: SessionStore + Clone>(state: AppState, store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pages = Router::new()
        .route("/", get(pages::index))
        .route("/dashboard", get(pages::dashboard))
        // Authentication
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        // Catalog
        .route("/books", get(books::list_books))
        .route("/add_book", get(books::add_book_page).post(books::add_book))
        // Borrowing
        .route("/borrowed_books", get(borrowing::borrowed_books))
        .route("/borrow_book/:book_id", post(borrowing::borrow_book))
        .layer(session_layer(store, &state.config.session))
        .with_state(state.clone());

    let probes = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state);

    Router::new()
        .merge(pages)
        .merge(probes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
