//! folio - Read-only Markdown content repository
//!
//! Reads a flat directory of blog posts (YAML frontmatter plus Markdown/MDX
//! body) and answers the queries a bilingual company site needs: listings,
//! single posts, featured posts, the tag index and related posts.
//!
//! # Failure model
//!
//! Queries never fail. A missing store reads as empty, a post with broken
//! frontmatter is skipped, an unparsable date sorts last. Every such case is
//! logged through `tracing`.
//!
//! # Modules
//!
//! - `library`: Stores, frontmatter parsing, queries and the reader
//! - `domain`: Data structures (ContentDocument, ReadTime)
//! - `locale`: Thai/English date formatting
//! - `config`: Config file and environment resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```rust,ignore
//! use folio::{ContentReader, FsStore};
//!
//! let reader = ContentReader::new(FsStore::new("content/blog"));
//! let latest = reader.list_all_documents().await;
//! let related = reader.list_related_documents("martech-stack", 3).await;
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod locale;

// Re-export main types at crate root for convenience
pub use config::{load_config, ResolvedConfig};
pub use domain::{ContentDocument, ReadTime};
pub use library::{ContentError, ContentReader, ContentStore, FsStore, MemoryStore};
pub use locale::{format_date, Locale};
