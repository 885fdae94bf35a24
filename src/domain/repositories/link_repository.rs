//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Slug uniqueness is scoped per user and enforced authoritatively by the
/// composite unique index on `(user_id, slug)`; the existence checks here are
/// advisory and callers must still handle [`AppError::Conflict`] from
/// [`LinkRepository::create`] as a collision.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug already exists for the
    /// owner (unique index violation). Returns [`AppError::Internal`] on
    /// other database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Checks whether a slug is already taken for a user.
    async fn slug_exists(&self, user_id: i64, slug: &str) -> Result<bool, AppError>;

    /// Finds a link by id.
    ///
    /// Returns `Ok(None)` if the link does not exist, which the task runner
    /// treats as a successful no-op rather than an error.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its owner's id and slug.
    async fn find_by_user_and_slug(
        &self,
        user_id: i64,
        slug: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Finds a link by its owner's username and slug, for the public
    /// redirect path `/{username}/{slug}`.
    async fn find_by_username_and_slug(
        &self,
        username: &str,
        slug: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Lists a user's links, most recent first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Link>, AppError>;

    /// Deletes a user's link by slug.
    ///
    /// Returns `Ok(true)` if the link was found and deleted.
    async fn delete(&self, user_id: i64, slug: &str) -> Result<bool, AppError>;
}
