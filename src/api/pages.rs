//! Landing and dashboard pages

use axum::Json;
use serde::Serialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::SessionData,
    session::{self, CurrentUser, Flash},
};

/// View model for pages that only show a form or static content
#[derive(Serialize, ToSchema)]
pub struct PageView {
    /// Template name
    pub page: String,
    /// Signed-in user, if any
    pub user: Option<SessionData>,
    /// Notices queued by the previous request
    pub notices: Vec<Flash>,
}

impl PageView {
    pub async fn render(page: &str, session: &Session) -> AppResult<Json<Self>> {
        Ok(Json(Self {
            page: page.to_string(),
            user: session::current_user(session).await?,
            notices: session::take_flashes(session).await?,
        }))
    }
}

#[derive(Serialize, ToSchema)]
pub struct DashboardView {
    pub full_name: String,
    pub user: SessionData,
    pub notices: Vec<Flash>,
}

/// Landing page
#[utoipa::path(
    get,
    path = "/",
    tag = "pages",
    responses(
        (status = 200, description = "Landing page", body = PageView)
    )
)]
pub async fn index(session: Session) -> AppResult<Json<PageView>> {
    PageView::render("index", &session).await
}

/// Dashboard of the signed-in user
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "pages",
    responses(
        (status = 200, description = "Dashboard", body = DashboardView),
        (status = 303, description = "Not signed in, redirected to /login")
    )
)]
pub async fn dashboard(
    CurrentUser(user): CurrentUser,
    session: Session,
) -> AppResult<Json<DashboardView>> {
    Ok(Json(DashboardView {
        full_name: user.full_name(),
        user,
        notices: session::take_flashes(&session).await?,
    }))
}
