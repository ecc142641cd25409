//! Backing stores for raw content documents.
//!
//! A store maps keys (filename stems) to raw frontmatter-plus-body text.
//! It knows nothing about the document format.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use glob::Pattern;
use tokio::fs;

use super::error::ContentError;

/// Read-only source of raw documents
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Human-readable store name (for logs)
    fn name(&self) -> &str;

    /// Every document key, sorted ascending and unique
    async fn keys(&self) -> Result<Vec<String>, ContentError>;

    /// Raw text for `key`, `Ok(None)` if there is no such document
    async fn read(&self, key: &str) -> Result<Option<String>, ContentError>;
}

/// Extensions accepted when nothing is configured, in priority order
pub fn default_extensions() -> Vec<String> {
    vec!["mdx".to_string(), "md".to_string()]
}

/// File-name patterns skipped when nothing is configured
pub fn default_exclude() -> Vec<String> {
    vec!["_*".to_string()]
}

/// A flat directory of content files
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl FsStore {
    /// Store over `root` with the default extensions and exclusions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: default_extensions(),
            exclude: compile_patterns(&default_exclude()),
        }
    }

    /// Replace the accepted extensions (earlier entries win on duplicate stems)
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Replace the exclude patterns; invalid globs are logged and dropped
    pub fn with_exclude(mut self, patterns: &[String]) -> Self {
        self.exclude = compile_patterns(patterns);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(file_name))
    }

    /// Key and extension rank for a file name this store accepts
    fn key_for(&self, file_name: &str) -> Option<(String, usize)> {
        self.extensions.iter().enumerate().find_map(|(rank, ext)| {
            file_name
                .strip_suffix(ext.as_str())
                .and_then(|s| s.strip_suffix('.'))
                .filter(|stem| !stem.is_empty())
                .map(|stem| (stem.to_string(), rank))
        })
    }

    fn unavailable(&self, source: std::io::Error) -> ContentError {
        ContentError::StoreUnavailable {
            path: self.root.clone(),
            source,
        }
    }
}

fn compile_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!(pattern = %p, error = %e, "Ignoring invalid exclude pattern");
                None
            }
        })
        .collect()
}

/// Keys must name a file directly under the root
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains(['/', '\\', '\0'])
        && key != "."
        && key != ".."
}

#[async_trait]
impl ContentStore for FsStore {
    fn name(&self) -> &str {
        "fs"
    }

    async fn keys(&self) -> Result<Vec<String>, ContentError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| self.unavailable(e))?;

        // key -> (extension rank, file name)
        let mut found: BTreeMap<String, (usize, String)> = BTreeMap::new();

        while let Some(entry) = entries.next_entry().await.map_err(|e| self.unavailable(e))? {
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if self.is_excluded(&name) {
                tracing::debug!(file = %name, "Skipping excluded file");
                continue;
            }
            let Some((key, rank)) = self.key_for(&name) else {
                continue;
            };

            // Follow symlinks; skip directories named like documents
            match fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(file = %name, error = %e, "Skipping unreadable entry");
                    continue;
                }
            }

            let replace = match found.get(&key) {
                Some((existing_rank, existing)) if *existing_rank <= rank => {
                    tracing::warn!(%key, kept = %existing, skipped = %name, "Duplicate document key");
                    false
                }
                Some((_, existing)) => {
                    tracing::warn!(%key, kept = %name, skipped = %existing, "Duplicate document key");
                    true
                }
                None => true,
            };
            if replace {
                found.insert(key, (rank, name));
            }
        }

        Ok(found.into_keys().collect())
    }

    async fn read(&self, key: &str) -> Result<Option<String>, ContentError> {
        if !is_valid_key(key) {
            return Ok(None);
        }

        for ext in &self.extensions {
            let file_name = format!("{}.{}", key, ext);
            if self.is_excluded(&file_name) {
                continue;
            }

            let path = self.root.join(&file_name);

            // Same rule as `keys`: only regular files (symlinks followed) count
            match fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => return Err(ContentError::Io { path, source }),
            }

            match fs::read_to_string(&path).await {
                Ok(raw) => return Ok(Some(raw)),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => return Err(ContentError::Io { path, source }),
            }
        }

        // Distinguish "no such document" from "no store at all"
        match fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(None),
            Ok(_) => Err(self.unavailable(std::io::Error::new(
                ErrorKind::Other,
                "content root is not a directory",
            ))),
            Err(e) => Err(self.unavailable(e)),
        }
    }
}

/// In-memory store, keyed by document key
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a raw document
    pub fn with_document(mut self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        self.insert(key, raw);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.documents.insert(key.into(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn keys(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.documents.keys().cloned().collect())
    }

    async fn read(&self, key: &str) -> Result<Option<String>, ContentError> {
        Ok(self.documents.get(key).cloned())
    }
}
