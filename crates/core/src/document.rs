//! Document field rules.
//!
//! Title and content arrive as raw user input. They are trimmed before
//! validation and stored trimmed.

use crate::error::CoreError;

/// Entity name used in `CoreError::NotFound` for documents.
pub const DOCUMENT_ENTITY: &str = "Document";

/// Maximum length for a document title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validated, trimmed title/content pair ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFields {
    pub title: String,
    pub content: String,
}

/// Validate a title: non-empty after trimming and within the length limit.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate content: non-empty after trimming. Markup is allowed.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Content must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Trim and validate both fields, returning the values to store.
pub fn prepare_fields(title: &str, content: &str) -> Result<DocumentFields, CoreError> {
    validate_title(title)?;
    validate_content(content)?;
    Ok(DocumentFields {
        title: title.trim().to_string(),
        content: content.trim().to_string(),
    })
}
