//! Click analytics for a user's links.

use std::sync::Arc;

use crate::domain::entities::{Click, Link, ReferrerCount};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use serde_json::json;

/// Number of top referrers returned in link stats.
const TOP_REFERRERS_LIMIT: i64 = 5;

/// Number of recent clicks returned in link stats.
const RECENT_CLICKS_LIMIT: i64 = 10;

/// Aggregated analytics for one link.
///
/// Counts are at-least-once: a retried click-record task may have written a
/// duplicate row after a transient failure.
#[derive(Debug)]
pub struct LinkStats {
    pub link: Link,
    pub total_clicks: i64,
    pub top_referrers: Vec<ReferrerCount>,
    pub recent_clicks: Vec<Click>,
}

/// Service for aggregating click statistics.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl StatsService {
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Collects analytics for one of a user's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug does not belong to the user.
    pub async fn link_stats(&self, user_id: i64, slug: &str) -> Result<LinkStats, AppError> {
        let link = self
            .links
            .find_by_user_and_slug(user_id, slug)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "slug": slug })))?;

        let total_clicks = self.clicks.count_for_link(link.id).await?;
        let top_referrers = self
            .clicks
            .top_referrers(link.id, TOP_REFERRERS_LIMIT)
            .await?;
        let recent_clicks = self
            .clicks
            .recent_for_link(link.id, RECENT_CLICKS_LIMIT)
            .await?;

        Ok(LinkStats {
            link,
            total_clicks,
            top_referrers,
            recent_clicks,
        })
    }
}
