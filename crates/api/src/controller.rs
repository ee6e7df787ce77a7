//! Document use cases shared by the HTTP handlers.
//!
//! [`VersionController`] owns the pool and turns store-level results into
//! [`AppError`]s. Handlers stay thin: they parse the request, call one method
//! here, and wrap the result.

use std::collections::HashMap;

use docver_core::diff::{self, Segment};
use docver_core::normalize::normalize;
use docver_core::types::DbId;
use docver_core::version_tree::{VersionNode, VersionTree};
use docver_db::models::document::{CreateDocument, Document};
use docver_db::repositories::DocumentRepo;
use docver_db::DbPool;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct VersionController {
    pool: DbPool,
}

impl VersionController {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new root document.
    pub async fn create_document(&self, title: &str, content: &str) -> AppResult<Document> {
        let document =
            DocumentRepo::create_root(&self.pool, &CreateDocument::new(title, content)).await?;
        tracing::info!(document_id = document.id, "Document created");
        Ok(document)
    }

    pub async fn get_document(&self, id: DbId) -> AppResult<Document> {
        Ok(DocumentRepo::get(&self.pool, id).await?)
    }

    /// Root documents only, oldest first.
    pub async fn list_documents(&self) -> AppResult<Vec<Document>> {
        Ok(DocumentRepo::list_roots(&self.pool).await?)
    }

    /// Save a new version as a child of `parent_id`. Returns the new id.
    pub async fn save_version(
        &self,
        parent_id: DbId,
        title: &str,
        content: &str,
    ) -> AppResult<DbId> {
        let version =
            DocumentRepo::create_version(&self.pool, parent_id, &CreateDocument::new(title, content))
                .await?;
        tracing::info!(document_id = version.id, parent_id, "Version saved");
        Ok(version.id)
    }

    /// Character diff from the parent's normalized text to this version's.
    ///
    /// Roots have nothing to compare against and yield an empty list.
    pub async fn compute_diff(&self, id: DbId) -> AppResult<Vec<Segment>> {
        let (document, parent) = DocumentRepo::get_with_parent(&self.pool, id).await?;
        let Some(parent) = parent else {
            return Ok(Vec::new());
        };
        let parent_id = parent.id;

        let segments = tokio::task::spawn_blocking(move || {
            let base = normalize(&parent.content);
            let target = normalize(&document.content);
            diff::diff(&base, &target)
        })
        .await
        .map_err(|e| AppError::InternalError(format!("Diff task failed: {e}")))?;

        tracing::debug!(
            document_id = id,
            parent_id,
            segment_count = segments.len(),
            "Diff computed"
        );
        Ok(segments)
    }

    /// `id` and all of its descendants, nested by parent.
    pub async fn version_history(&self, id: DbId) -> AppResult<VersionNode<Document>> {
        let documents = DocumentRepo::list_subtree(&self.pool, id).await?;
        let tree = VersionTree::from_edges(documents.iter().map(|d| (d.id, d.parent_id)));
        let items: HashMap<DbId, Document> = documents.into_iter().map(|d| (d.id, d)).collect();
        tree.nest(id, items).ok_or_else(|| {
            AppError::InternalError(format!("History of document {id} could not be assembled"))
        })
    }

    /// Delete a document and every descendant. Returns the removed ids,
    /// leaves first.
    pub async fn delete_document(&self, id: DbId) -> AppResult<Vec<DbId>> {
        let deleted = DocumentRepo::delete(&self.pool, id).await?;
        tracing::info!(document_id = id, deleted_count = deleted.len(), "Document deleted");
        Ok(deleted)
    }
}
