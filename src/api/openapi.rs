//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrowing, health, pages};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "0.1.0",
        description = "Library management web application: members, catalog and borrow records"
    ),
    paths(
        health::health_check,
        health::readiness_check,
        pages::index,
        pages::dashboard,
        auth::login_page,
        auth::login,
        auth::register_page,
        auth::register,
        auth::logout,
        books::list_books,
        books::add_book_page,
        books::add_book,
        borrowing::borrowed_books,
        borrowing::borrow_book,
    ),
    components(
        schemas(
            pages::PageView,
            pages::DashboardView,
            books::BooksView,
            borrowing::BorrowedBooksView,
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::borrow::BorrowedBook,
            crate::models::borrow::BorrowRecord,
            crate::models::user::Registration,
            crate::models::user::Credentials,
            crate::models::user::SessionData,
            crate::session::Flash,
            crate::session::FlashLevel,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "pages", description = "Landing and dashboard pages"),
        (name = "auth", description = "Registration, login and logout"),
        (name = "books", description = "Catalog"),
        (name = "borrowing", description = "Borrow records")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
