//! Frontmatter splitting and typed metadata coercion.
//!
//! A document looks like:
//!
//! ```text
//! ---
//! title: Hello
//! description: First post
//! date: 2023-07-01
//! tags: [tech, ux]
//! ---
//! Body text...
//! ```

use serde::Deserialize;
use serde_yaml::Value;

use super::error::ContentError;
use crate::domain::{ContentDocument, ReadTime};

/// Frontmatter as authored, before defaults are applied
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFrontmatter {
    title: String,
    description: String,
    #[serde(default, alias = "publishDate")]
    date: Option<Value>,
    #[serde(default)]
    tags: Option<Value>,
    #[serde(default)]
    featured: Option<Value>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    author_image: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

/// Scalar rendered as text; mappings, sequences and null yield `None`
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `tags: ux` and `tags: [ux, 2023]` are both accepted; non-scalar items are dropped
fn coerce_tags(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items.into_iter().filter_map(scalar_text).collect(),
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}

/// `true`, `"true"` and `"yes"` (any case) are featured; anything else is not
fn coerce_featured(value: Option<Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes"),
        _ => false,
    }
}

/// Split raw text into `(metadata, body)`.
///
/// Returns `None` when the text does not open with a `---` line or the
/// block is never closed by a `---` or `...` line.
pub fn split_frontmatter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let end = offset + line.len();
        let marker = line.trim_end();
        if marker == "---" || marker == "..." {
            return Some((&raw[start..offset], &raw[end..]));
        }
        offset = end;
    }

    None
}

/// Parse a raw document into a typed [`ContentDocument`]
pub fn parse_document(
    key: &str,
    raw: &str,
    words_per_minute: u32,
) -> Result<ContentDocument, ContentError> {
    let (metadata, body) = split_frontmatter(raw).ok_or_else(|| {
        let opened = raw
            .strip_prefix('\u{feff}')
            .unwrap_or(raw)
            .lines()
            .next()
            .is_some_and(|l| l.trim_end() == "---");
        if opened {
            ContentError::malformed(key, "unterminated frontmatter block")
        } else {
            ContentError::malformed(key, "missing frontmatter block")
        }
    })?;

    let meta: RawFrontmatter =
        serde_yaml::from_str(metadata).map_err(|e| ContentError::malformed(key, e.to_string()))?;

    let publish_date = match meta.date {
        Some(v @ (Value::String(_) | Value::Number(_))) => scalar_text(v).unwrap_or_default(),
        _ => String::new(),
    };

    Ok(ContentDocument {
        key: key.to_string(),
        title: meta.title,
        description: meta.description,
        publish_date,
        tags: coerce_tags(meta.tags),
        featured: coerce_featured(meta.featured),
        author: meta.author,
        author_image: meta.author_image,
        thumbnail: meta.thumbnail,
        read_time: ReadTime::estimate(body, words_per_minute),
        body: body.to_string(),
    })
}
