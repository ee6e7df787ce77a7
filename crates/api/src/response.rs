//! Shared response envelope types for API handlers.
//!
//! Resource responses use a `{ "data": ... }` envelope. The diff endpoint is
//! the exception: it returns the bare segment array.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: documents }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
