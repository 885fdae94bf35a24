//! Repository trait for session token storage.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for bearer session tokens.
///
/// Tokens are stored as HMAC-SHA256 hashes, never in plaintext; an attacker
/// with read-only database access cannot replay sessions without the
/// server-side signing secret.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session for a user.
    async fn create(
        &self,
        token_hash: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Resolves a token hash to its user, if the session exists and has not
    /// expired.
    async fn find_user_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, AppError>;

    /// Deletes a session by token hash (logout).
    ///
    /// Returns `Ok(true)` if a session was deleted.
    async fn delete(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Bulk-deletes all expired sessions, returning the number removed.
    async fn delete_expired(&self) -> Result<u64, AppError>;
}
