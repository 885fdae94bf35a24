//! Repository trait for single-use password reset tokens.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for password reset tokens.
///
/// Tokens are stored hashed and consumed atomically: a token can confirm at
/// most one password reset, after which it is gone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    /// Stores a new reset token for a user.
    async fn create(
        &self,
        token_hash: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Deletes the token and returns its user id, if the token exists and
    /// has not expired.
    async fn consume(&self, token_hash: &str) -> Result<Option<i64>, AppError>;
}
