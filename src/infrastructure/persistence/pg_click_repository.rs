//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick, ReferrerCount};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click events.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError> {
        let click = sqlx::query_as::<_, Click>(
            r#"
            INSERT INTO link_clicks (link_id, referrer, user_agent, ip_address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, referrer, user_agent, ip_address, created_at
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.referrer)
        .bind(&new_click.user_agent)
        .bind(&new_click.ip_address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(click)
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM link_clicks WHERE link_id = $1",
        )
        .bind(link_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn top_referrers(
        &self,
        link_id: i64,
        limit: i64,
    ) -> Result<Vec<ReferrerCount>, AppError> {
        let referrers = sqlx::query_as::<_, ReferrerCount>(
            r#"
            SELECT referrer, COUNT(*) AS count
            FROM link_clicks
            WHERE link_id = $1 AND referrer IS NOT NULL AND referrer <> ''
            GROUP BY referrer
            ORDER BY count DESC
            LIMIT $2
            "#,
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(referrers)
    }

    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError> {
        let clicks = sqlx::query_as::<_, Click>(
            r#"
            SELECT id, link_id, referrer, user_agent, ip_address, created_at
            FROM link_clicks
            WHERE link_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(clicks)
    }
}
