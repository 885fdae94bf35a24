//! Handlers for account and session endpoints.

use axum::{Extension, Json, extract::State, http::HeaderMap, http::StatusCode};
use validator::Validate;

use crate::api::dto::accounts::{
    LoginRequest, LoginResponse, PasswordResetConfirmRequest, PasswordResetRequest,
    RegisterRequest, UserResponse,
};
use crate::api::middleware::auth::bearer_token;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user account.
///
/// # Endpoint
///
/// `POST /api/register`
///
/// A welcome email is enqueued on the task runner; registration never waits
/// for delivery.
///
/// # Errors
///
/// Returns 400 on validation failure and 409 if the username or email is
/// already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let user = state
        .account_service
        .register(payload.username, payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Opens a session and returns its bearer token.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Errors
///
/// Returns 401 for unknown usernames and wrong passwords alike; the response
/// does not distinguish the two.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let token = state
        .account_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse { token }))
}

/// Closes the current session.
///
/// # Endpoint
///
/// `POST /api/logout` (authenticated)
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = bearer_token(&headers)?;
    state.account_service.logout(token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the authenticated user's profile.
///
/// # Endpoint
///
/// `GET /api/me` (authenticated)
pub async fn me_handler(Extension(user): Extension<User>) -> Json<UserResponse> {
    Json(user.into())
}

/// Starts a password reset for an email address.
///
/// # Endpoint
///
/// `POST /api/password-reset`
///
/// Always returns 202 Accepted, whether or not the address is registered.
/// For a known address a reset email is enqueued on the task runner.
pub async fn password_reset_request_handler(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .account_service
        .request_password_reset(&payload.email)
        .await?;

    Ok(StatusCode::ACCEPTED)
}

/// Completes a password reset with a token from the emailed link.
///
/// # Endpoint
///
/// `POST /api/password-reset/confirm`
///
/// # Errors
///
/// Returns 400 for an unknown, expired, or already used token.
pub async fn password_reset_confirm_handler(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetConfirmRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .account_service
        .confirm_password_reset(&payload.token, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
