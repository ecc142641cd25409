//! Domain types for the content reader.
//!
//! - Document: one post with its typed frontmatter and body
//! - Reading: derived reading-time estimate

pub mod document;
pub mod reading;

pub use document::{parse_publish_date, ContentDocument};
pub use reading::{ReadTime, DEFAULT_WORDS_PER_MINUTE};
