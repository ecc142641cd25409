//! Pure queries over an already-loaded list of documents.
//!
//! The reader calls these after each fresh load; callers that already hold a
//! `list_all_documents` result can use them directly to answer several
//! queries from one read.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use crate::domain::ContentDocument;

/// Sort newest first; unparsable dates go last, equal dates keep their order
pub fn sort_by_recency(documents: &mut [ContentDocument]) {
    // None < Some(_), so reversing puts undated documents at the end
    documents.sort_by_cached_key(|d| Reverse(d.published_at()));
}

/// Featured documents, order preserved
pub fn featured(documents: &[ContentDocument]) -> Vec<&ContentDocument> {
    documents.iter().filter(|d| d.featured).collect()
}

/// Documents carrying exactly `tag` (case-sensitive), order preserved
pub fn with_tag<'a>(documents: &'a [ContentDocument], tag: &str) -> Vec<&'a ContentDocument> {
    documents.iter().filter(|d| d.has_tag(tag)).collect()
}

/// Every distinct tag, sorted ascending
pub fn all_tags(documents: &[ContentDocument]) -> Vec<String> {
    documents
        .iter()
        .flat_map(|d| d.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The first `limit` documents
pub fn recent(documents: &[ContentDocument], limit: usize) -> Vec<&ContentDocument> {
    documents.iter().take(limit).collect()
}

/// Number of distinct tags `a` and `b` have in common
pub fn shared_tag_count(a: &ContentDocument, b: &ContentDocument) -> usize {
    let a_tags: HashSet<&str> = a.tags.iter().map(String::as_str).collect();
    let b_tags: HashSet<&str> = b.tags.iter().map(String::as_str).collect();
    a_tags.intersection(&b_tags).count()
}

/// Documents sharing at least one tag with `current`, best match first.
///
/// Ties keep the order of `documents`, so passing a recency-sorted list
/// breaks ties by recency. `current` itself is never included.
pub fn related<'a>(
    documents: &'a [ContentDocument],
    current: &ContentDocument,
    limit: usize,
) -> Vec<&'a ContentDocument> {
    if limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &ContentDocument)> = documents
        .iter()
        .filter(|d| d.key != current.key)
        .map(|d| (shared_tag_count(current, d), d))
        .filter(|(score, _)| *score > 0)
        .collect();

    // Stable: equal scores stay in input order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().take(limit).map(|(_, d)| d).collect()
}
