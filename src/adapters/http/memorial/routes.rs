//! Axum routes for memorial endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    add_photo, create_memorial, delete_guestbook_entry, delete_photo, get_memorial_page,
    list_memorials, sign_guestbook, update_memorial,
};

/// Memorial routes, mounted at `/api/memorials`.
///
/// - `GET /` / `POST /` - dashboard list, create
/// - `GET /:id` / `PATCH /:id` - page (optional auth), owner update
/// - `POST /:id/photos`, `DELETE /:id/photos/:photo_id` - Memory Lane
/// - `POST /:id/guestbook`, `DELETE /:id/guestbook/:entry_id` - Letters of Love
pub fn memorial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_memorials).post(create_memorial))
        .route("/:id", get(get_memorial_page).patch(update_memorial))
        .route("/:id/photos", post(add_photo))
        .route("/:id/photos/:photo_id", delete(delete_photo))
        .route("/:id/guestbook", post(sign_guestbook))
        .route("/:id/guestbook/:entry_id", delete(delete_guestbook_entry))
}
