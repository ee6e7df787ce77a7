//! Request handlers, one module per resource.
//!
//! Handlers delegate to [`VersionController`](crate::controller::VersionController)
//! and only deal with extraction and response shaping.

pub mod documents;
