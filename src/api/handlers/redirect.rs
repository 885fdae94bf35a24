//! Handler for short URL redirect.

use axum::{
    Extension,
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use std::net::SocketAddr;

use crate::domain::tasks::DeliveryTask;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short link to its target URL.
///
/// # Endpoint
///
/// `GET /{username}/{slug}`
///
/// The click is recorded by enqueuing a task on the background runner; the
/// redirect never waits for the click row to be written. If the task queue
/// is full the click is dropped (fire-and-forget).
///
/// # Errors
///
/// Returns 404 Not Found if the username/slug pair does not exist.
pub async fn redirect_handler(
    Path((username, slug)): Path<(String, String)>,
    State(state): State<AppState>,
    headers: HeaderMap,
    addr: Option<Extension<ConnectInfo<SocketAddr>>>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.resolve(&username, &slug).await?;

    let referrer = header_value(&headers, header::REFERER);
    let user_agent = header_value(&headers, header::USER_AGENT);
    let ip_address = addr.map(|Extension(ConnectInfo(addr))| addr.ip().to_string());

    // Handle dropped at enqueue time; delivery is observable only in logs.
    let _ = state
        .tasks
        .enqueue(DeliveryTask::RecordClick {
            link_id: link.id,
            referrer,
            user_agent,
            ip_address,
        })
        .await;

    Ok(Redirect::temporary(&link.target_url))
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
