//! HTTP handlers for memorial, gallery and guestbook endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::memorial::{
    AddPhotoCommand, CreateMemorialCommand, DeleteGuestbookEntryCommand, DeletePhotoCommand,
    GetMemorialPageQuery, ListMemorialsQuery, SignGuestbookCommand, UpdateMemorialCommand,
};
use crate::domain::foundation::{GuestbookEntryId, MemorialId, PhotoId};

use super::dto::{
    AddPhotoRequest, CreateMemorialRequest, GuestbookEntryResponse, MemorialListResponse,
    MemorialPageResponse, MemorialResponse, PhotoResponse, SignGuestbookRequest,
    UpdateMemorialRequest,
};

/// Path ids that fail to parse name nothing, so they read as not found.
fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("{} not found", what)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Memorials
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/memorials - Create a memorial
pub async fn create_memorial(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<CreateMemorialRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let cmd = CreateMemorialCommand {
        owner_id: user.id,
        name: req.name,
        bio: req.bio,
        service_type: req.service_type,
        visibility: req.visibility,
        date_of_birth: req.date_of_birth,
        date_of_passing: req.date_of_passing,
        image_ref: req.image_ref,
    };

    let memorial = state.create_memorial_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(MemorialResponse::new(&memorial, &state.media)),
    ))
}

/// GET /api/memorials - List the caller's memorials
pub async fn list_memorials(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListMemorialsQuery { owner_id: user.id };
    let memorials = state.list_memorials_handler().handle(query).await?;

    Ok(Json(MemorialListResponse {
        memorials: memorials
            .iter()
            .map(|m| MemorialResponse::new(m, &state.media))
            .collect(),
    }))
}

/// GET /api/memorials/:id - Memorial page with photos and letters
pub async fn get_memorial_page(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetMemorialPageQuery {
        memorial_id: parse_id::<MemorialId>(&id, "Memorial")?,
        viewer: user.map(|u| u.id),
    };

    let page = state.memorial_page_handler().handle(query).await?;

    Ok(Json(MemorialPageResponse::new(&page, &state.media)))
}

/// PATCH /api/memorials/:id - Partial update, owner only
pub async fn update_memorial(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMemorialRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let memorial_id = parse_id::<MemorialId>(&id, "Memorial")?;
    let Json(req) = payload?;

    let cmd = UpdateMemorialCommand {
        memorial_id,
        caller: user.id,
        name: req.name,
        bio: req.bio,
        service_type: req.service_type,
        visibility: req.visibility,
        date_of_birth: req.date_of_birth,
        date_of_passing: req.date_of_passing,
        image_ref: req.image_ref,
    };

    let memorial = state.update_memorial_handler().handle(cmd).await?;

    Ok(Json(MemorialResponse::new(&memorial, &state.media)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Memory Lane
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/memorials/:id/photos - Add a photo, owner only
pub async fn add_photo(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    payload: Result<Json<AddPhotoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let memorial_id = parse_id::<MemorialId>(&id, "Memorial")?;
    let Json(req) = payload?;

    let cmd = AddPhotoCommand {
        memorial_id,
        caller: user.id,
        image_ref: req.image_ref,
        caption: req.caption,
    };

    let photo = state.add_photo_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(PhotoResponse::new(&photo, &state.media))))
}

/// DELETE /api/memorials/:id/photos/:photo_id - Remove a photo, owner only
pub async fn delete_photo(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((id, photo_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeletePhotoCommand {
        memorial_id: parse_id::<MemorialId>(&id, "Memorial")?,
        photo_id: parse_id::<PhotoId>(&photo_id, "Photo")?,
        caller: user.id,
    };

    state.delete_photo_handler().handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Letters of Love
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/memorials/:id/guestbook - Sign the guestbook
pub async fn sign_guestbook(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    payload: Result<Json<SignGuestbookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let memorial_id = parse_id::<MemorialId>(&id, "Memorial")?;
    let Json(req) = payload?;

    let cmd = SignGuestbookCommand {
        memorial_id,
        author: user,
        author_name: req.author_name,
        message: req.message,
        role: req.role,
    };

    let entry = state.sign_guestbook_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(GuestbookEntryResponse::from(&entry))))
}

/// DELETE /api/memorials/:id/guestbook/:entry_id - Moderate a letter, owner only
pub async fn delete_guestbook_entry(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path((id, entry_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteGuestbookEntryCommand {
        memorial_id: parse_id::<MemorialId>(&id, "Memorial")?,
        entry_id: parse_id::<GuestbookEntryId>(&entry_id, "Guestbook entry")?,
        caller: user.id,
    };

    state.delete_guestbook_entry_handler().handle(cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}
