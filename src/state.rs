//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AccountService, LinkService, StatsService};
use crate::domain::tasks::TaskQueue;

/// Application state shared by all request handlers.
///
/// Services are behind `Arc` so the state stays cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub account_service: Arc<AccountService>,
    pub stats_service: Arc<StatsService>,
    pub tasks: TaskQueue,
    /// Public base URL, no trailing slash. Used to build short URLs in
    /// responses.
    pub base_url: String,
}
