//! HTTP adapter for memorial pages, Memory Lane and Letters of Love.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddPhotoRequest, CreateMemorialRequest, GuestbookEntryResponse, MemorialListResponse,
    MemorialPageResponse, MemorialResponse, PhotoResponse, SignGuestbookRequest,
    UpdateMemorialRequest,
};
pub use routes::memorial_routes;
