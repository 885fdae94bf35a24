//! Click event entity for link analytics.

use chrono::{DateTime, Utc};

/// A recorded click on a short link.
///
/// Rows are created only by the asynchronous task runner, never in the
/// redirect request path.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a click.
///
/// All client metadata is optional; missing headers are stored as NULL.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// Aggregated referrer count for a link's analytics view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReferrerCount {
    pub referrer: String,
    pub count: i64,
}
