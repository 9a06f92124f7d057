//! Authentication service: registration, login and the session guard

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{Credentials, NewUser, Registration, SessionData},
    repository::Repository,
    session,
};
use tower_sessions::Session;

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
}

impl AuthService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new member and return its id
    pub async fn register(&self, registration: Registration) -> AppResult<i32> {
        if registration.password != registration.repassword {
            return Err(AppError::PasswordMismatch);
        }
        registration.validate()?;

        if self.repository.users.email_exists(&registration.email).await? {
            return Err(AppError::DuplicateEmail);
        }

        let user = NewUser {
            password_hash: hash_password(&registration.password)?,
            fname: registration.fname,
            lname: registration.lname,
            email: registration.email,
            contact: registration.contact,
        };

        let id = self.repository.users.create(&user).await?;
        tracing::info!("Registered user id={} email={}", id, user.email);
        Ok(id)
    }

    /// Check credentials and return the attributes to install in the session
    pub async fn login(&self, credentials: &Credentials) -> AppResult<SessionData> {
        tracing::info!("Login attempt: email={}", credentials.email);

        let user = self
            .repository
            .users
            .get_by_email(&credentials.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&user.password_hash, &credentials.password)? {
            tracing::warn!("Rejected login for email={}", credentials.email);
            return Err(AppError::InvalidCredentials);
        }

        Ok(SessionData::from(&user))
    }
}

/// Forget everything held by the session and drop it from the store.
/// Safe to call without a session.
pub async fn logout(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

/// Guard used by every handler that needs a signed-in user
pub async fn require_session(session: &Session) -> AppResult<SessionData> {
    session::current_user(session)
        .await?
        .ok_or(AppError::Unauthenticated)
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash in constant time
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
