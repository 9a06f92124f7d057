//! Authentication endpoints: register, login, logout

use axum::{extract::State, response::Redirect, Form, Json};
use tower_sessions::Session;

use crate::{
    error::AppResult,
    models::user::{Credentials, Registration},
    services::auth,
    session::{self, FlashLevel},
    AppState,
};

use super::pages::PageView;

/// Login form
#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses(
        (status = 200, description = "Login form", body = PageView)
    )
)]
pub async fn login_page(session: Session) -> AppResult<Json<PageView>> {
    PageView::render("login", &session).await
}

/// Authenticate and open a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = Credentials, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, redirected to /dashboard"),
        (status = 401, description = "Invalid email or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(credentials): Form<Credentials>,
) -> AppResult<Redirect> {
    let user = state.services.auth.login(&credentials).await?;

    session::sign_in(&session, user).await?;
    session::flash(&session, FlashLevel::Success, "Login successful!").await?;
    Ok(Redirect::to("/dashboard"))
}

/// Registration form
#[utoipa::path(
    get,
    path = "/register",
    tag = "auth",
    responses(
        (status = 200, description = "Registration form", body = PageView)
    )
)]
pub async fn register_page(session: Session) -> AppResult<Json<PageView>> {
    PageView::render("register", &session).await
}

/// Create an account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body(content = Registration, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered, redirected to /login"),
        (status = 400, description = "Invalid input or passwords do not match", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(registration): Form<Registration>,
) -> AppResult<Redirect> {
    state.services.auth.register(registration).await?;

    session::flash(
        &session,
        FlashLevel::Success,
        "Registration successful! Please log in.",
    )
    .await?;
    Ok(Redirect::to("/login"))
}

/// Close the session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Signed out, redirected to /login")
    )
)]
pub async fn logout(session: Session) -> AppResult<Redirect> {
    auth::logout(&session).await?;
    session::flash(&session, FlashLevel::Success, "You have been logged out").await?;
    Ok(Redirect::to("/login"))
}
