//! Account registration, authentication, and password reset.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{ResetTokenRepository, SessionRepository, UserRepository};
use crate::domain::tasks::{DeliveryTask, TaskQueue};
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::tokens::{generate_token, hash_token};

/// Service for user accounts and sessions.
///
/// Email side effects (welcome, password reset) are enqueued on the task
/// queue and never executed in the request path.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    reset_tokens: Arc<dyn ResetTokenRepository>,
    tasks: TaskQueue,
    signing_secret: String,
    base_url: String,
    session_ttl_seconds: i64,
    reset_token_ttl_seconds: i64,
}

impl AccountService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        reset_tokens: Arc<dyn ResetTokenRepository>,
        tasks: TaskQueue,
        signing_secret: String,
        base_url: String,
        session_ttl_seconds: i64,
        reset_token_ttl_seconds: i64,
    ) -> Self {
        Self {
            users,
            sessions,
            reset_tokens,
            tasks,
            signing_secret,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_ttl_seconds,
            reset_token_ttl_seconds,
        }
    }

    /// Registers a new user and enqueues the welcome email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: &str,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        let login_url = format!("{}/login", self.base_url);
        let _ = self
            .tasks
            .enqueue(DeliveryTask::WelcomeEmail {
                user_id: user.id,
                login_url,
            })
            .await;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Authenticates credentials and opens a session, returning the raw
    /// bearer token.
    ///
    /// Unknown username and wrong password produce the same error, so login
    /// responses do not reveal which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let invalid =
            || AppError::unauthorized("Invalid username or password", json!({}));

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash) {
            return Err(invalid());
        }

        let token = generate_token();
        let expires_at = Utc::now() + Duration::seconds(self.session_ttl_seconds);
        self.sessions
            .create(&hash_token(&token, &self.signing_secret), user.id, expires_at)
            .await?;

        tracing::info!(user_id = user.id, "session opened");
        Ok(token)
    }

    /// Resolves a bearer token to its user.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        self.sessions
            .find_user_by_token_hash(&hash_token(token, &self.signing_secret))
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or expired session" }),
                )
            })
    }

    /// Closes the session for a bearer token. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.sessions
            .delete(&hash_token(token, &self.signing_secret))
            .await?;
        Ok(())
    }

    /// Requests a password reset for an email address.
    ///
    /// Always succeeds regardless of whether the address is registered
    /// (anti-enumeration): the caller sees the same outcome either way, and
    /// delivery happens asynchronously. For a known address a single-use
    /// expiring token is stored hashed and a reset email is enqueued.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::debug!("password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_token();
        let expires_at = Utc::now() + Duration::seconds(self.reset_token_ttl_seconds);
        self.reset_tokens
            .create(&hash_token(&token, &self.signing_secret), user.id, expires_at)
            .await?;

        let reset_link = format!("{}/reset-password/{}", self.base_url, token);
        let _ = self
            .tasks
            .enqueue(DeliveryTask::PasswordResetEmail {
                user_id: user.id,
                reset_link,
            })
            .await;

        tracing::info!(user_id = user.id, "password reset requested");
        Ok(())
    }

    /// Confirms a password reset with a token from the emailed link.
    ///
    /// The token is consumed atomically; a second confirmation with the same
    /// token fails.
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let invalid = || {
            AppError::bad_request("Invalid or expired reset token", json!({}))
        };

        let user_id = self
            .reset_tokens
            .consume(&hash_token(token, &self.signing_secret))
            .await?
            .ok_or_else(invalid)?;

        let password_hash = hash_password(new_password)?;
        if !self.users.update_password(user_id, &password_hash).await? {
            // User deleted between token issue and confirmation.
            return Err(invalid());
        }

        tracing::info!(user_id, "password reset completed");
        Ok(())
    }

    /// Bulk-deletes expired sessions, returning the number removed.
    pub async fn cleanup_expired_sessions(&self) -> Result<u64, AppError> {
        let deleted = self.sessions.delete_expired().await?;
        tracing::info!(deleted, "expired sessions cleaned up");
        Ok(deleted)
    }
}
