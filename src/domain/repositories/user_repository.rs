//! Repository trait for user account data access.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is already
    /// registered. Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Finds a user by id.
    ///
    /// Returns `Ok(None)` if the user does not exist, which the task runner
    /// treats as a successful no-op rather than an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Replaces the stored password hash for a user.
    ///
    /// Returns `Ok(true)` if the user existed and was updated.
    async fn update_password(&self, user_id: i64, password_hash: &str) -> Result<bool, AppError>;
}
