//! Document models and DTOs.
//!
//! A document row is one node of the version forest. Rows are never
//! updated after insertion.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use docver_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `documents` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Document {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub parent_id: Option<DbId>,
}

/// The `(id, parent_id)` projection used to walk the version tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct DocumentEdge {
    pub id: DbId,
    pub parent_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a root document or a new version.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub title: String,
    pub content: String,
}

impl CreateDocument {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
