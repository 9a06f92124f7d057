//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Registered member as stored in the database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub fname: String,
    pub lname: String,
    pub email: String,
    /// Argon2 PHC string, never sent to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub contact: String,
}

/// Registration form, as posted by the register page
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct Registration {
    #[serde(default)]
    #[validate(length(min = 1, max = 80))]
    pub fname: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 80))]
    pub lname: String,
    #[serde(default)]
    #[validate(email, length(max = 80))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
    /// Password confirmation
    #[serde(default)]
    pub repassword: String,
    #[serde(default, rename = "mobile")]
    #[validate(length(min = 1, max = 15))]
    pub contact: String,
}

/// User row ready for insertion, password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub password_hash: String,
    pub contact: String,
}

/// Login form
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Authenticated user attributes kept in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionData {
    pub user_id: i32,
    pub email: String,
    pub fname: String,
    pub lname: String,
}

impl SessionData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fname, self.lname)
    }
}

impl From<&User> for SessionData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            fname: user.fname.clone(),
            lname: user.lname.clone(),
        }
    }
}
