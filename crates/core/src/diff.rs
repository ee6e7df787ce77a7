//! Character diff with semantic cleanup.
//!
//! The edit script comes from `dissimilar`, which runs Myers over characters
//! and then folds the one-letter noise typical of prose edits into whole
//! words. Equal + insert text rebuilds the target; equal + delete text
//! rebuilds the base.

use dissimilar::Chunk;
use serde::{Deserialize, Serialize};

/// The kind of a diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Delete,
    Equal,
    Insert,
}

/// One unit of diff output. Serializes as `{"type": "...", "text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub kind: Operation,
    pub text: String,
}

impl Segment {
    pub fn new(kind: Operation, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl From<Chunk<'_>> for Segment {
    fn from(chunk: Chunk<'_>) -> Self {
        match chunk {
            Chunk::Equal(text) => Self::new(Operation::Equal, text),
            Chunk::Delete(text) => Self::new(Operation::Delete, text),
            Chunk::Insert(text) => Self::new(Operation::Insert, text),
        }
    }
}

/// Compute a cleaned-up edit script transforming `base` into `target`.
///
/// Never emits empty segments.
pub fn diff(base: &str, target: &str) -> Vec<Segment> {
    dissimilar::diff(base, target)
        .into_iter()
        .map(Segment::from)
        .filter(|segment| !segment.text.is_empty())
        .collect()
}

/// Rebuild the base text from a diff (equal + delete segments).
pub fn reconstruct_base(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != Operation::Insert)
        .map(|s| s.text.as_str())
        .collect()
}

/// Rebuild the target text from a diff (equal + insert segments).
pub fn reconstruct_target(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter(|s| s.kind != Operation::Delete)
        .map(|s| s.text.as_str())
        .collect()
}
