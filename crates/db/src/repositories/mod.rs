//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&SqlitePool` as the first argument.

pub mod document_repo;

pub use document_repo::DocumentRepo;
