//! Handler for link analytics endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::api::dto::stats::LinkStatsResponse;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click statistics for one of the authenticated user's links.
///
/// # Endpoint
///
/// `GET /api/links/{slug}/stats` (authenticated)
///
/// # Response
///
/// ```json
/// {
///   "slug": "my-link",
///   "target_url": "https://example.com",
///   "total_clicks": 42,
///   "top_referrers": [
///     { "referrer": "https://news.ycombinator.com", "count": 30 }
///   ],
///   "recent_clicks": [
///     { "referrer": null, "user_agent": "curl/8.0", "created_at": "..." }
///   ]
/// }
/// ```
///
/// Counts are at-least-once: a click recorded through a retried task may be
/// counted twice.
///
/// # Errors
///
/// Returns 404 if the slug does not belong to the user.
pub async fn link_stats_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let stats = state.stats_service.link_stats(user.id, &slug).await?;

    Ok(Json(stats.into()))
}
