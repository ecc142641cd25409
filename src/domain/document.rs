//! The content document: one blog post.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::reading::ReadTime;

/// A parsed content document with its derived fields
///
/// Serializes with camelCase names (`publishDate`, `authorImage`,
/// `readTime`) to match the frontmatter vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    /// Filename stem, unique within a store
    pub key: String,

    pub title: String,

    pub description: String,

    /// Raw publish date as written in the frontmatter (empty when absent)
    pub publish_date: String,

    /// Tags in authored order
    pub tags: Vec<String>,

    /// Selected for promotional placement
    pub featured: bool,

    pub author: Option<String>,

    pub author_image: Option<String>,

    pub thumbnail: Option<String>,

    /// Unrendered body following the frontmatter
    pub body: String,

    /// Estimated reading time of `body`
    pub read_time: ReadTime,
}

impl ContentDocument {
    /// Parsed publish date, `None` if missing or unparsable
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        parse_publish_date(&self.publish_date)
    }

    /// Check for an exact (case-sensitive) tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Parse a frontmatter date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 (normalized to UTC) and naive
/// `YYYY-MM-DDTHH:MM[:SS]` / `YYYY-MM-DD HH:MM[:SS]`.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(date: &str) -> ContentDocument {
        ContentDocument {
            key: "post".to_string(),
            title: "Post".to_string(),
            description: "A post".to_string(),
            publish_date: date.to_string(),
            tags: vec!["tech".to_string(), "UX".to_string()],
            featured: false,
            author: None,
            author_image: None,
            thumbnail: None,
            body: String::new(),
            read_time: ReadTime::estimate("", 200),
        }
    }

    #[test]
    fn test_parse_plain_date() {
        let dt = parse_publish_date("2023-06-20").unwrap();
        assert_eq!(dt.to_string(), "2023-06-20 00:00:00");
    }

    #[test]
    fn test_parse_rfc3339_normalizes_to_utc() {
        let dt = parse_publish_date("2023-06-20T07:30:00+07:00").unwrap();
        assert_eq!(dt.to_string(), "2023-06-20 00:30:00");
    }

    #[test]
    fn test_parse_naive_timestamp() {
        assert!(parse_publish_date("2023-06-20T10:00:00").is_some());
        assert!(parse_publish_date("2023-06-20 10:00:00").is_some());
    }

    #[test]
    fn test_parse_minute_precision_timestamp() {
        let dt = parse_publish_date("2023-09-01T10:00").unwrap();
        assert_eq!(dt.to_string(), "2023-09-01 10:00:00");

        let dt = parse_publish_date("2023-09-01 10:05").unwrap();
        assert_eq!(dt.to_string(), "2023-09-01 10:05:00");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_publish_date("").is_none());
        assert!(parse_publish_date("   ").is_none());
        assert!(parse_publish_date("next tuesday").is_none());
        assert!(parse_publish_date("2023-13-45").is_none());
    }

    #[test]
    fn test_has_tag_is_case_sensitive() {
        let d = doc("2023-01-01");
        assert!(d.has_tag("tech"));
        assert!(d.has_tag("UX"));
        assert!(!d.has_tag("ux"));
        assert!(!d.has_tag("Tech"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(doc("2023-01-01")).unwrap();
        assert_eq!(json["publishDate"], "2023-01-01");
        assert!(json.get("authorImage").is_some());
        assert_eq!(json["readTime"]["minutes"], 1);
    }
}
