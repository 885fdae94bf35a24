//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for short links.
///
/// The `(user_id, slug)` composite unique index is the authoritative
/// serialization point for slug allocation; `create` surfaces its violation
/// as [`AppError::Conflict`] through the shared SQLx error mapping.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (user_id, slug, target_url)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, slug, target_url, created_at
            "#,
        )
        .bind(new_link.user_id)
        .bind(&new_link.slug)
        .bind(&new_link.target_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn slug_exists(&self, user_id: i64, slug: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM links WHERE user_id = $1 AND slug = $2)",
        )
        .bind(user_id)
        .bind(slug)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT id, user_id, slug, target_url, created_at FROM links WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_user_and_slug(
        &self,
        user_id: i64,
        slug: &str,
    ) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, user_id, slug, target_url, created_at
            FROM links
            WHERE user_id = $1 AND slug = $2
            "#,
        )
        .bind(user_id)
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_username_and_slug(
        &self,
        username: &str,
        slug: &str,
    ) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT l.id, l.user_id, l.slug, l.target_url, l.created_at
            FROM links l
            JOIN users u ON u.id = l.user_id
            WHERE u.username = $1 AND l.slug = $2
            "#,
        )
        .bind(username)
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, user_id, slug, target_url, created_at
            FROM links
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn delete(&self, user_id: i64, slug: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE user_id = $1 AND slug = $2")
            .bind(user_id)
            .bind(slug)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
