//! ListMemorialsHandler - Query handler for the owner's dashboard.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::memorial::{Memorial, MemorialError};
use crate::ports::MemorialRepository;

/// Query for the memorials a user owns.
#[derive(Debug, Clone)]
pub struct ListMemorialsQuery {
    pub owner_id: UserId,
}

/// Handler for listing memorials.
pub struct ListMemorialsHandler {
    memorials: Arc<dyn MemorialRepository>,
}

impl ListMemorialsHandler {
    pub fn new(memorials: Arc<dyn MemorialRepository>) -> Self {
        Self { memorials }
    }

    /// Newest first.
    pub async fn handle(&self, query: ListMemorialsQuery) -> Result<Vec<Memorial>, MemorialError> {
        Ok(self.memorials.list_by_owner(&query.owner_id).await?)
    }
}
