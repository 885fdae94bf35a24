//! Repository trait for click tracking and analytics.

use crate::domain::entities::{Click, NewClick, ReferrerCount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click events.
///
/// Click rows are written by the asynchronous task runner with at-least-once
/// semantics: a retried task attempt that failed after the insert may create
/// one duplicate row. Analytics queries tolerate this approximation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a single click event.
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Total number of recorded clicks for a link.
    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError>;

    /// Most frequent non-empty referrers for a link.
    async fn top_referrers(&self, link_id: i64, limit: i64)
    -> Result<Vec<ReferrerCount>, AppError>;

    /// Most recent clicks for a link.
    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError>;
}
