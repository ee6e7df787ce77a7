pub mod documents;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /documents    document and version management
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/documents", documents::router())
}
