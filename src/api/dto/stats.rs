//! DTOs for link analytics endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::LinkStats;
use crate::domain::entities::{Click, ReferrerCount};

/// Aggregated click statistics for one link.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub slug: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub top_referrers: Vec<ReferrerCountItem>,
    pub recent_clicks: Vec<ClickItem>,
}

#[derive(Debug, Serialize)]
pub struct ReferrerCountItem {
    pub referrer: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct ClickItem {
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ReferrerCount> for ReferrerCountItem {
    fn from(rc: ReferrerCount) -> Self {
        Self {
            referrer: rc.referrer,
            count: rc.count,
        }
    }
}

impl From<Click> for ClickItem {
    fn from(click: Click) -> Self {
        Self {
            referrer: click.referrer,
            user_agent: click.user_agent,
            created_at: click.created_at,
        }
    }
}

impl From<LinkStats> for LinkStatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            slug: stats.link.slug,
            target_url: stats.link.target_url,
            total_clicks: stats.total_clicks,
            top_referrers: stats.top_referrers.into_iter().map(Into::into).collect(),
            recent_clicks: stats.recent_clicks.into_iter().map(Into::into).collect(),
        }
    }
}
