//! Handlers for the `/documents` resource.
//!
//! Roots and saved versions are the same row type; the only difference is
//! whether `parent_id` is set.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docver_core::types::DbId;
use docver_core::version_tree::VersionNode;
use docver_db::models::document::Document;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /documents` and `POST /documents/{id}/versions`.
///
/// Missing fields deserialize as empty strings and are rejected by
/// validation, not by the JSON extractor.
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Response body for `POST /documents/{id}/versions`.
#[derive(Debug, Serialize)]
pub struct SavedVersion {
    pub id: DbId,
}

/// Response body for `DELETE /documents/{id}`.
#[derive(Debug, Serialize)]
pub struct DeletedDocuments {
    pub deleted_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/documents
pub async fn list_documents(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Document>>>> {
    let documents = state.controller.list_documents().await?;
    Ok(Json(DataResponse { data: documents }))
}

/// POST /api/v1/documents
pub async fn create_document(
    State(state): State<AppState>,
    Json(input): Json<DocumentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Document>>)> {
    let document = state
        .controller
        .create_document(&input.title, &input.content)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// GET /api/v1/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Document>>> {
    let document = state.controller.get_document(id).await?;
    Ok(Json(DataResponse { data: document }))
}

/// DELETE /api/v1/documents/{id}
///
/// Removes the document and all of its descendants.
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeletedDocuments>>> {
    let deleted_ids = state.controller.delete_document(id).await?;
    Ok(Json(DataResponse {
        data: DeletedDocuments { deleted_ids },
    }))
}

/// POST /api/v1/documents/{id}/versions
pub async fn save_version(
    State(state): State<AppState>,
    Path(parent_id): Path<DbId>,
    Json(input): Json<DocumentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SavedVersion>>)> {
    let id = state
        .controller
        .save_version(parent_id, &input.title, &input.content)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SavedVersion { id },
        }),
    ))
}

/// GET /api/v1/documents/{id}/history
pub async fn version_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<VersionNode<Document>>>> {
    let history = state.controller.version_history(id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /api/v1/documents/{id}/diff
///
/// Returns the bare segment array. Internal failures carry the underlying
/// message in `{"error": ...}`; caller errors use the regular error body.
pub async fn get_diff(State(state): State<AppState>, Path(id): Path<DbId>) -> Response {
    match state.controller.compute_diff(id).await {
        Ok(segments) => Json(segments).into_response(),
        Err(err) if err.is_internal() => {
            tracing::error!(document_id = id, error = %err, "Diff computation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
        Err(err) => err.into_response(),
    }
}
