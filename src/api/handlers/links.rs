//! Handlers for link management endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkListResponse, LinkResponse};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for the authenticated user.
///
/// # Endpoint
///
/// `POST /api/links` (authenticated)
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "slug": "my-link"  // optional; generated when omitted
/// }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL or slug format
/// - 409 if the requested slug is already taken by this user
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(user.id, payload.url, payload.slug)
        .await?;

    let response = LinkResponse::from_link(link, &state.base_url, &user.username);
    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists the authenticated user's links, most recent first.
///
/// # Endpoint
///
/// `GET /api/links` (authenticated)
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list_links(user.id).await?;

    let links: Vec<LinkResponse> = links
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &state.base_url, &user.username))
        .collect();

    Ok(Json(LinkListResponse {
        total: links.len(),
        links,
    }))
}

/// Deletes one of the authenticated user's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{slug}` (authenticated)
///
/// # Errors
///
/// Returns 404 if the slug does not belong to the user.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(user.id, &slug).await?;

    Ok(StatusCode::NO_CONTENT)
}
