//! API route configuration.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};

use crate::api::handlers::{
    create_link_handler, delete_link_handler, health_handler, link_stats_handler,
    list_links_handler, login_handler, logout_handler, me_handler,
    password_reset_confirm_handler, password_reset_request_handler, register_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Routes that require no session.
///
/// # Endpoints
///
/// - `GET  /health`                  - Service health
/// - `POST /register`                - Create an account
/// - `POST /login`                   - Open a session
/// - `POST /password-reset`          - Request a reset email
/// - `POST /password-reset/confirm`  - Complete a reset
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/password-reset", post(password_reset_request_handler))
        .route("/password-reset/confirm", post(password_reset_confirm_handler))
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /logout`               - Close the current session
/// - `GET    /me`                   - Authenticated user profile
/// - `GET    /links`                - List own links
/// - `POST   /links`                - Create a short link
/// - `DELETE /links/{slug}`         - Delete a link
/// - `GET    /links/{slug}/stats`   - Click statistics for a link
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout_handler))
        .route("/me", get(me_handler))
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{slug}", delete(delete_link_handler))
        .route("/links/{slug}/stats", get(link_stats_handler))
        .layer(axum_middleware::from_fn_with_state(state, auth::layer))
}
