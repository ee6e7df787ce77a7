//! Route definitions for documents and their versions.
//!
//! Mounted at `/documents`.
//!
//! ```text
//! GET    /                 list root documents
//! POST   /                 create a root document
//! GET    /{id}             get one document or version
//! DELETE /{id}             delete a document with all descendants
//! POST   /{id}/versions    save a new version under {id}
//! GET    /{id}/history     nested version tree below {id}
//! GET    /{id}/diff        diff of {id} against its parent
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::documents;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/{id}",
            get(documents::get_document).delete(documents::delete_document),
        )
        .route("/{id}/versions", post(documents::save_version))
        .route("/{id}/history", get(documents::version_history))
        .route("/{id}/diff", get(documents::get_diff))
}
