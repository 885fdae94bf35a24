//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Extracts the Bearer token from the `Authorization` header.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] if the header is missing or is not of
/// the form `Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })
}

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the resolved [`crate::domain::entities::User`] is inserted into
/// request extensions for handlers to read via `Extension<User>`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Session is not found or expired
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers())?.to_string();

    let user = st.account_service.authenticate(&token).await?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
