//! Plain-text extraction from marked-up document content.
//!
//! Diffs are computed over normalized text so that formatting changes
//! (tags, entities, re-wrapped lines) do not show up as edits.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Named and numeric entities decoded before tags are stripped.
const ENTITIES: &[(&str, &str)] = &[
    ("nbsp", " "),
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("#39", "'"),
];

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(nbsp|amp|lt|gt|quot|apos|#39);").expect("valid regex"));

/// A tag runs from `<` to the nearest `>`. An unterminated `<` never matches.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Convert marked-up text into whitespace-normalized plain text.
///
/// Entity decoding and tag stripping repeat until the text is stable, so
/// escaped markup such as `&lt;b&gt;` is removed as well and the result is
/// a fixed point: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_tags(&decode_entities(&current)).into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    collapse_whitespace(&current)
}

/// Replace known entities with their literal characters in a single pass.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY_RE.replace_all(text, |caps: &Captures| {
        let name = &caps[1];
        ENTITIES
            .iter()
            .find(|(entity, _)| *entity == name)
            .map(|(_, literal)| *literal)
            .unwrap_or_default()
            .to_string()
    })
}

/// Remove every complete `<...>` tag.
pub fn strip_tags(text: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(text, "")
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}
