//! Catalog endpoints

use axum::{extract::State, response::Redirect, Form, Json};
use serde::Serialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    session::{self, CurrentUser, Flash, FlashLevel},
    AppState,
};

use super::pages::PageView;

#[derive(Serialize, ToSchema)]
pub struct BooksView {
    pub books: Vec<Book>,
    pub notices: Vec<Flash>,
}

/// List the catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Every book of the catalog", body = BooksView)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<BooksView>> {
    let books = state.services.catalog.list_books().await?;

    Ok(Json(BooksView {
        books,
        notices: session::take_flashes(&session).await?,
    }))
}

/// Add-book form
#[utoipa::path(
    get,
    path = "/add_book",
    tag = "books",
    responses(
        (status = 200, description = "Add-book form", body = PageView),
        (status = 303, description = "Not signed in, redirected to /login")
    )
)]
pub async fn add_book_page(_user: CurrentUser, session: Session) -> AppResult<Json<PageView>> {
    PageView::render("add_book", &session).await
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/add_book",
    tag = "books",
    request_body(content = CreateBook, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book added, redirected to /dashboard"),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
    Form(book): Form<CreateBook>,
) -> AppResult<Redirect> {
    let id = state.services.catalog.add_book(book).await?;
    tracing::debug!("Book id={} added by user id={}", id, user.user_id);

    session::flash(&session, FlashLevel::Success, "Book added successfully!").await?;
    Ok(Redirect::to("/dashboard"))
}
