//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{username}/{slug}` - Short link redirect (public)
//! - `/api/*`                 - REST API (public account endpoints plus
//!   Bearer-protected link management)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on protected API routes
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;

/// All application routes with state applied, without outer middleware.
///
/// Integration tests mount this directly; production goes through
/// [`app_router`].
pub fn router(state: AppState) -> Router {
    let api_router =
        api::routes::public_routes().merge(api::routes::protected_routes(state.clone()));

    Router::new()
        .route("/{username}/{slug}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = router(state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
