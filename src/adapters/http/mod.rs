//! HTTP adapters - REST API implementations.
//!
//! Each area has its own adapter module (`dto`, `handlers`, `routes`);
//! `app_router` assembles them under `/api`.
//!
//! ```text
//! GET  /health
//! /api ─┬─ [auth middleware] ─┬─ /memorials/...
//!       │                     ├─ /profile
//!       │                     ├─ /create-checkout
//!       │                     └─ /subscription
//!       └─ /paymongo/webhook   (signature verified, no bearer token)
//! ```

mod error;
mod health;
mod media;
pub mod memorial;
pub mod middleware;
pub mod profile;
mod state;
pub mod subscription;

use axum::routing::get;
use axum::Router;

pub use error::{ApiError, ErrorResponse};
pub use health::HealthResponse;
pub use media::MediaUrls;
pub use state::AppState;

/// Builds the full API router over the given state.
///
/// Tower layers for tracing, CORS and timeouts are added by the binary.
pub fn app_router(state: AppState) -> Router {
    let authenticated = Router::new()
        .nest("/memorials", memorial::memorial_routes())
        .nest("/profile", profile::profile_routes())
        .merge(subscription::subscription_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.session_validator.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .nest(
            "/api",
            authenticated.merge(subscription::webhook_routes()),
        )
        .with_state(state)
}
