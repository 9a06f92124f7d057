//! Per-client sessions.
//!
//! Sessions are managed by `tower-sessions`: the [`SessionManagerLayer`] built by
//! [`session_layer`] issues the cookie, loads the record and writes it back when a
//! handler changed it. A record carries the signed-in user under [`USER_KEY`] and
//! the notices waiting for the next page under [`FLASHES_KEY`].

pub mod memory;
pub mod redis;

use std::time::Duration as StdDuration;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tower_sessions::{
    cookie::SameSite, Expiry, ExpiredDeletion, Session, SessionManagerLayer, SessionStore,
};
use utoipa::ToSchema;

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::user::SessionData,
    services::auth,
};

pub use memory::MemorySessionStore;
pub use redis::RedisSessionStore;

/// Session key of the signed-in user
pub const USER_KEY: &str = "user";
/// Session key of the pending notices
pub const FLASHES_KEY: &str = "flashes";

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

/// One-shot notice displayed by the next page view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Build the session layer from the cookie and expiry settings
pub fn session_layer<Store: SessionStore>(
    store: Store,
    config: &SessionConfig,
) -> SessionManagerLayer<Store> {
    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_path("/")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.secure_cookie)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            config.ttl_minutes,
        )))
}

/// Delete expired records every `period` until the runtime shuts down
pub fn spawn_expiry_sweep<Store>(store: Store, period: StdDuration) -> JoinHandle<()>
where
    Store: ExpiredDeletion + Clone,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = store.delete_expired().await {
                tracing::warn!("Failed to delete expired sessions: {}", e);
            }
        }
    })
}

/// Signed-in user, if any
pub async fn current_user(session: &Session) -> AppResult<Option<SessionData>> {
    Ok(session.get::<SessionData>(USER_KEY).await?)
}

/// Bind the user to the session, replacing any previous one
pub async fn sign_in(session: &Session, user: SessionData) -> AppResult<()> {
    session.insert(USER_KEY, user).await?;
    Ok(())
}

pub async fn flash(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> AppResult<()> {
    let mut flashes: Vec<Flash> = session.get(FLASHES_KEY).await?.unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.into(),
    });
    session.insert(FLASHES_KEY, flashes).await?;
    Ok(())
}

/// Remove and return the pending notices
pub async fn take_flashes(session: &Session) -> AppResult<Vec<Flash>> {
    // only a session holding notices is marked modified
    let Some(flashes) = session.get::<Vec<Flash>>(FLASHES_KEY).await? else {
        return Ok(Vec::new());
    };
    session.remove_value(FLASHES_KEY).await?;
    Ok(flashes)
}

/// Extractor for the signed-in user; anonymous requests are sent to the login page
pub struct CurrentUser(pub SessionData);

fn login_notice(path: &str) -> &'static str {
    match path {
        "/dashboard" => "Please log in to access the dashboard",
        "/borrowed_books" => "Please log in to view borrowed books.",
        p if p.starts_with("/borrow_book") => "Please log in to borrow books.",
        _ => "Please log in to continue.",
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        match auth::require_session(&session).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(AppError::Unauthenticated) => {
                flash(&session, FlashLevel::Danger, login_notice(parts.uri.path())).await?;
                Err(AppError::Unauthenticated)
            }
            Err(e) => Err(e),
        }
    }
}
