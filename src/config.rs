//! Configuration for the content reader.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (FOLIO_CONTENT_DIR, FOLIO_WORDS_PER_MINUTE)
//! 2. Config file (.folio/config.yaml)
//! 3. Defaults (content/blog, 200 words per minute)
//!
//! Config file discovery:
//! - Searches current directory and parents for .folio/config.yaml
//! - Paths in config file are relative to the project root (parent of .folio/)
//!
//! Nothing is cached globally: callers load a [`ResolvedConfig`] and pass it
//! to [`ContentReader::from_config`](crate::library::ContentReader::from_config).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::DEFAULT_WORDS_PER_MINUTE;
use crate::library::store::{default_exclude, default_extensions};
use crate::library::DEFAULT_RELATED_LIMIT;

/// Content directory used when nothing is configured (relative to cwd)
pub const DEFAULT_CONTENT_DIR: &str = "content/blog";

pub const ENV_CONTENT_DIR: &str = "FOLIO_CONTENT_DIR";
pub const ENV_WORDS_PER_MINUTE: &str = "FOLIO_WORDS_PER_MINUTE";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub reading: Option<ReadingConfig>,
    #[serde(default)]
    pub related: Option<RelatedConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Content directory (relative to project root)
    pub dir: Option<String>,
    /// Accepted extensions, highest priority first
    pub extensions: Option<Vec<String>>,
    /// File-name globs to skip
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadingConfig {
    pub words_per_minute: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedConfig {
    pub limit: Option<usize>,
}

/// Resolved configuration with absolute or cwd-relative paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub content_dir: PathBuf,
    pub extensions: Vec<String>,
    pub exclude: Vec<String>,
    pub words_per_minute: u32,
    pub related_limit: usize,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            extensions: default_extensions(),
            exclude: default_exclude(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            related_limit: DEFAULT_RELATED_LIMIT,
            config_file: None,
        }
    }
}

impl ResolvedConfig {
    /// Override the content directory (e.g. from a CLI flag)
    pub fn with_content_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.content_dir = dir.into();
        self
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".folio").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Build the resolved config from an optional file and an env lookup
fn resolve(
    config_file: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig::default();

    if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Project root is the parent of .folio/
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        if let Some(ref dir) = config.content.dir {
            resolved.content_dir = resolve_path(base_dir, dir);
        } else {
            resolved.content_dir = base_dir.join(DEFAULT_CONTENT_DIR);
        }
        if let Some(extensions) = config.content.extensions {
            resolved.extensions = extensions;
        }
        if let Some(exclude) = config.content.exclude {
            resolved.exclude = exclude;
        }
        if let Some(wpm) = config.reading.and_then(|r| r.words_per_minute) {
            resolved.words_per_minute = wpm;
        }
        if let Some(limit) = config.related.and_then(|r| r.limit) {
            resolved.related_limit = limit;
        }
    }

    if let Some(dir) = env(ENV_CONTENT_DIR) {
        resolved.content_dir = PathBuf::from(dir);
    }
    if let Some(wpm) = env(ENV_WORDS_PER_MINUTE) {
        resolved.words_per_minute = wpm
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", ENV_WORDS_PER_MINUTE, wpm))?;
    }

    if resolved.words_per_minute == 0 {
        anyhow::bail!("words_per_minute must be greater than zero");
    }

    resolved.config_file = config_file;
    Ok(resolved)
}

/// Load configuration from all sources
pub fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve(find_config_file(&cwd), |name| std::env::var(name).ok())
}

/// Load configuration, searching for a config file from `start`
pub fn load_config_from(start: &Path) -> Result<ResolvedConfig> {
    resolve(find_config_file(start), |name| std::env::var(name).ok())
}
