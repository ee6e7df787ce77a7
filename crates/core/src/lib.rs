//! Domain logic for versioned documents.
//!
//! Pure code only: no database or HTTP concerns live here. The `db` and `api`
//! crates build on these types.

pub mod diff;
pub mod document;
pub mod error;
pub mod normalize;
pub mod types;
pub mod version_tree;
