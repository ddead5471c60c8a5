use std::sync::Arc;

use crate::core::Result;
use crate::modules::directory::models::{DirectoryEntry, DirectoryKind};
use crate::modules::directory::repositories::directory_repository::DirectoryRepository;

/// Lookup service behind the booking form's picker widgets
pub struct DirectoryService {
    repo: Arc<DirectoryRepository>,
}

impl DirectoryService {
    pub fn new(repo: Arc<DirectoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn search(
        &self,
        kind: DirectoryKind,
        query: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DirectoryEntry>> {
        self.repo.search(kind, query, limit, offset).await
    }
}
