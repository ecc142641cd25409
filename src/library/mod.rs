//! Content library: reading Markdown posts from a backing store.
//!
//! # Store Layout
//!
//! ```text
//! content/blog/
//! ├── digital-transformation.mdx   # key: digital-transformation
//! ├── martech-stack.md             # key: martech-stack
//! └── _draft-idea.md               # excluded (leading underscore)
//! ```
//!
//! Each file opens with a YAML frontmatter block followed by the body.

pub mod error;
pub mod frontmatter;
pub mod query;
pub mod reader;
pub mod store;

pub use error::ContentError;
pub use frontmatter::{parse_document, split_frontmatter};
pub use reader::{ContentReader, DEFAULT_RELATED_LIMIT};
pub use store::{ContentStore, FsStore, MemoryStore};
