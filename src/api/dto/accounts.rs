//! DTOs for account and session endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::User;

/// Compiled regex for username validation.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_-]+$").unwrap());

/// Request to register a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Becomes the first path segment of the user's short URLs.
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*USERNAME_REGEX"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 10, max = 128))]
    pub password: String,
}

/// Request to open a session.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response containing the session bearer token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Request to start a password reset.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Request to complete a password reset with an emailed token.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordResetConfirmRequest {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 10, max = 128))]
    pub new_password: String,
}

/// Public representation of a user account.
///
/// The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
