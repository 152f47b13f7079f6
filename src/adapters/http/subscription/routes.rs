//! Axum routes for payment and subscription endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{create_checkout, get_subscription, handle_paymongo_webhook};

/// User-facing payment routes, mounted under `/api`.
///
/// - `POST /create-checkout` - start a hosted checkout
/// - `GET /subscription` - caller's plan and `canPublish`
pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/create-checkout", post(create_checkout))
        .route("/subscription", get(get_subscription))
}

/// Webhook routes, mounted under `/api`.
///
/// Kept apart from the authenticated routes: deliveries are verified by
/// signature, not bearer token.
///
/// - `POST /paymongo/webhook`
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/paymongo/webhook", post(handle_paymongo_webhook))
}
