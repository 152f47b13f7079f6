//! Axum routes for profile endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{get_profile, save_profile};

/// Profile routes, mounted at `/api/profile`.
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(save_profile))
}
