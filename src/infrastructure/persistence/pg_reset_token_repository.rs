//! PostgreSQL implementation of the password reset token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::ResetTokenRepository;
use crate::error::AppError;

/// PostgreSQL repository for password reset tokens.
pub struct PgResetTokenRepository {
    pool: Arc<PgPool>,
}

impl PgResetTokenRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResetTokenRepository for PgResetTokenRepository {
    async fn create(
        &self,
        token_hash: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO password_reset_tokens (token_hash, user_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn consume(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        // Delete-returning makes consumption atomic: concurrent confirms
        // with the same token cannot both succeed.
        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM password_reset_tokens
            WHERE token_hash = $1 AND expires_at > NOW()
            RETURNING user_id
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user_id)
    }
}
