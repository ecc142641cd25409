//! The content reader: read-only queries over a content store.
//!
//! Every call re-reads the store. Failures never reach the caller: a bad
//! document is logged and skipped, a missing store reads as empty.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, instrument, warn};

use super::error::ContentError;
use super::frontmatter::parse_document;
use super::query;
use super::store::{ContentStore, FsStore};
use crate::config::ResolvedConfig;
use crate::domain::{ContentDocument, DEFAULT_WORDS_PER_MINUTE};

/// Related documents returned when no limit is given
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Read-only query surface over a [`ContentStore`]
pub struct ContentReader {
    store: Box<dyn ContentStore>,
    words_per_minute: u32,
    related_limit: usize,
    /// Set after the first "store unavailable" warning
    store_warned: AtomicBool,
}

impl std::fmt::Debug for ContentReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentReader")
            .field("store", &self.store.name())
            .field("words_per_minute", &self.words_per_minute)
            .field("related_limit", &self.related_limit)
            .finish()
    }
}

impl ContentReader {
    /// Create a reader over `store` with default settings
    pub fn new(store: impl ContentStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            related_limit: DEFAULT_RELATED_LIMIT,
            store_warned: AtomicBool::new(false),
        }
    }

    /// Create a filesystem-backed reader from resolved configuration
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let store = FsStore::new(&config.content_dir)
            .with_extensions(config.extensions.iter().cloned())
            .with_exclude(&config.exclude);

        Self::new(store)
            .with_words_per_minute(config.words_per_minute)
            .with_related_limit(config.related_limit)
    }

    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    pub fn with_related_limit(mut self, limit: usize) -> Self {
        self.related_limit = limit;
        self
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    fn report(&self, key: Option<&str>, err: &ContentError) {
        let key = key.unwrap_or("-");
        match err {
            ContentError::StoreUnavailable { .. } => {
                if self.store_warned.swap(true, Ordering::Relaxed) {
                    debug!(store = self.store.name(), %key, error = %err, "Content store still unavailable");
                } else {
                    warn!(store = self.store.name(), %key, error = %err, "Content store unavailable, serving no documents");
                }
            }
            ContentError::MalformedMetadata { .. } => {
                warn!(%key, error = %err, "Skipping document with malformed metadata");
            }
            ContentError::NotFound { .. } => {
                debug!(%key, "Document not found");
            }
            ContentError::Io { .. } => {
                warn!(%key, error = %err, "Skipping unreadable document");
            }
        }
    }

    async fn load(&self, key: &str) -> Result<ContentDocument, ContentError> {
        let raw = self
            .store
            .read(key)
            .await?
            .ok_or_else(|| ContentError::NotFound { key: key.to_string() })?;

        parse_document(key, &raw, self.words_per_minute)
    }

    /// Every document key in the store; empty if the store is unavailable
    pub async fn list_all_keys(&self) -> Vec<String> {
        match self.store.keys().await {
            Ok(keys) => keys,
            Err(e) => {
                self.report(None, &e);
                Vec::new()
            }
        }
    }

    /// One fully populated document, or `None` if it cannot be produced
    #[instrument(skip(self))]
    pub async fn get_document(&self, key: &str) -> Option<ContentDocument> {
        match self.load(key).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                self.report(Some(key), &e);
                None
            }
        }
    }

    /// Every readable document, newest first
    pub async fn list_all_documents(&self) -> Vec<ContentDocument> {
        let mut documents = Vec::new();
        for key in self.list_all_keys().await {
            if let Some(doc) = self.get_document(&key).await {
                documents.push(doc);
            }
        }

        query::sort_by_recency(&mut documents);
        documents
    }

    /// Featured documents, newest first
    pub async fn list_featured_documents(&self) -> Vec<ContentDocument> {
        let documents = self.list_all_documents().await;
        query::featured(&documents).into_iter().cloned().collect()
    }

    /// The newest `limit` documents
    pub async fn list_recent_documents(&self, limit: usize) -> Vec<ContentDocument> {
        let mut documents = self.list_all_documents().await;
        documents.truncate(limit);
        documents
    }

    /// Documents tagged exactly `tag`, newest first
    pub async fn list_documents_by_tag(&self, tag: &str) -> Vec<ContentDocument> {
        let documents = self.list_all_documents().await;
        query::with_tag(&documents, tag).into_iter().cloned().collect()
    }

    /// Every distinct tag, sorted ascending
    pub async fn list_all_tags(&self) -> Vec<String> {
        query::all_tags(&self.list_all_documents().await)
    }

    /// Up to `limit` documents sharing tags with `key`, best match first
    #[instrument(skip(self))]
    pub async fn list_related_documents(&self, key: &str, limit: usize) -> Vec<ContentDocument> {
        let documents = self.list_all_documents().await;
        let Some(current) = documents.iter().find(|d| d.key == key) else {
            debug!(%key, "No current document, nothing is related");
            return Vec::new();
        };

        query::related(&documents, current, limit)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Related documents capped at the configured default limit
    pub async fn list_related_documents_default(&self, key: &str) -> Vec<ContentDocument> {
        self.list_related_documents(key, self.related_limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::store::MemoryStore;

    fn post(title: &str, date: &str, tags: &str, featured: bool) -> String {
        format!(
            "---\ntitle: {}\ndescription: About {}\ndate: {}\ntags: {}\nfeatured: {}\n---\nBody of {}.\n",
            title, title, date, tags, featured, title
        )
    }

    fn seed_store() -> MemoryStore {
        MemoryStore::new()
            .with_document("a", post("A", "2023-07-01", "[tech, ux]", true))
            .with_document("b", post("B", "2023-06-01", "[tech]", false))
            .with_document("c", post("C", "2023-08-01", "[ux, martech]", false))
    }

    fn keys(docs: &[ContentDocument]) -> Vec<&str> {
        docs.iter().map(|d| d.key.as_str()).collect()
    }

    #[tokio::test]
    async fn test_malformed_document_is_skipped() {
        let store = seed_store().with_document("broken", "---\ntitle: [oops\n---\n");
        let reader = ContentReader::new(store);

        assert_eq!(reader.list_all_keys().await.len(), 4);
        assert!(reader.get_document("broken").await.is_none());
        assert_eq!(keys(&reader.list_all_documents().await), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_related_for_malformed_or_missing_current_is_empty() {
        let store = seed_store().with_document("broken", "---\ntitle: [oops\n---\n");
        let reader = ContentReader::new(store);

        assert!(reader.list_related_documents("broken", 5).await.is_empty());
        assert!(reader.list_related_documents("ghost", 5).await.is_empty());
        assert_eq!(keys(&reader.list_related_documents("a", 5).await), vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_numeric_tags_keep_post_listed() {
        let store = seed_store().with_document(
            "y",
            "---\ntitle: Y\ndescription: D\ndate: 2023-09-01\ntags: [2023, tech]\nfeatured: \"true\"\n---\n",
        );
        let reader = ContentReader::new(store);

        let doc = reader.get_document("y").await.unwrap();
        assert_eq!(doc.tags, vec!["2023", "tech"]);
        assert!(doc.featured);
        assert_eq!(reader.list_all_tags().await, vec!["2023", "martech", "tech", "ux"]);
        assert_eq!(keys(&reader.list_featured_documents().await), vec!["y", "a"]);
    }

    #[tokio::test]
    async fn test_related_default_limit() {
        let reader = ContentReader::new(seed_store()).with_related_limit(1);
        assert_eq!(keys(&reader.list_related_documents_default("a").await), vec!["c"]);
    }

    #[tokio::test]
    async fn test_words_per_minute_applies() {
        let body = "word ".repeat(300);
        let store = MemoryStore::new().with_document(
            "long",
            format!("---\ntitle: L\ndescription: D\n---\n{}", body),
        );

        let reader = ContentReader::new(store.clone());
        assert_eq!(reader.get_document("long").await.unwrap().read_time.minutes, 2);

        let reader = ContentReader::new(store).with_words_per_minute(100);
        assert_eq!(reader.get_document("long").await.unwrap().read_time.minutes, 3);
    }

    #[tokio::test]
    async fn test_recent_documents() {
        let reader = ContentReader::new(seed_store());
        assert_eq!(keys(&reader.list_recent_documents(2).await), vec!["c", "a"]);
    }
}
