//! Borrowing endpoints

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use serde::Serialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::borrow::BorrowedBook,
    session::{self, CurrentUser, Flash, FlashLevel},
    AppState,
};

#[derive(Serialize, ToSchema)]
pub struct BorrowedBooksView {
    pub borrowed_books: Vec<BorrowedBook>,
    pub notices: Vec<Flash>,
}

/// Borrow records of the signed-in user
#[utoipa::path(
    get,
    path = "/borrowed_books",
    tag = "borrowing",
    responses(
        (status = 200, description = "Books borrowed by the current user", body = BorrowedBooksView),
        (status = 303, description = "Not signed in, redirected to /login")
    )
)]
pub async fn borrowed_books(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
) -> AppResult<Json<BorrowedBooksView>> {
    let borrowed_books = state
        .services
        .borrowing
        .list_borrowed_books(user.user_id)
        .await?;

    Ok(Json(BorrowedBooksView {
        borrowed_books,
        notices: session::take_flashes(&session).await?,
    }))
}

/// Borrow a book for the signed-in user
#[utoipa::path(
    post,
    path = "/borrow_book/{book_id}",
    tag = "borrowing",
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Borrowed (to /borrowed_books), unknown book (to /books) or not signed in (to /login)")
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
    Path(book_id): Path<i32>,
) -> AppResult<Redirect> {
    match state.services.borrowing.borrow_book(user.user_id, book_id).await {
        Ok(_) => {
            session::flash(&session, FlashLevel::Success, "Book borrowed successfully!").await?;
            Ok(Redirect::to("/borrowed_books"))
        }
        Err(AppError::BookNotFound) => {
            session::flash(&session, FlashLevel::Danger, AppError::BookNotFound.to_string())
                .await?;
            Ok(Redirect::to("/books"))
        }
        Err(e) => Err(e),
    }
}
