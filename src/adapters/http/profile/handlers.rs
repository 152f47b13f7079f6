//! HTTP handlers for profile endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::profile::{GetProfileQuery, SaveProfileCommand};

use super::dto::{ProfileResponse, SaveProfileRequest};

/// GET /api/profile - Caller's profile, 404 until first saved
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetProfileQuery { user_id: user.id };
    let profile = state.get_profile_handler().handle(query).await?;

    Ok(Json(ProfileResponse::new(&profile, &state.media)))
}

/// PUT /api/profile - Create or replace the caller's profile
pub async fn save_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<SaveProfileRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let cmd = SaveProfileCommand {
        user_id: user.id,
        full_name: req.full_name,
        avatar_ref: req.avatar_ref,
    };

    let profile = state.save_profile_handler().handle(cmd).await?;

    Ok(Json(ProfileResponse::new(&profile, &state.media)))
}
