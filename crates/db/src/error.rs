use docver_core::error::CoreError;

/// Failure of a Version Store operation.
///
/// Expected conditions (missing ids, invalid input) surface as
/// [`CoreError`]; anything the database reports is kept as-is.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
