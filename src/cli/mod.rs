//! Command-line interface for folio.
//!
//! Inspects a content directory the way the site sees it: listings,
//! single documents, the tag index and related posts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{self, ResolvedConfig};
use crate::domain::ContentDocument;
use crate::library::ContentReader;
use crate::locale::{format_date, Locale};

/// folio - Read-only Markdown content repository
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Content directory (overrides config file and FOLIO_CONTENT_DIR)
    #[arg(long, global = true)]
    pub content_dir: Option<PathBuf>,

    /// Locale for dates ("th" for Thai, anything else English)
    #[arg(long, global = true, default_value = "en")]
    pub locale: Locale,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every document key
    Keys,

    /// List documents, newest first
    List {
        /// Only featured documents
        #[arg(short, long)]
        featured: bool,

        /// Only documents with this tag (case-sensitive)
        #[arg(short, long)]
        tag: Option<String>,

        /// Maximum number of documents to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one document
    Show {
        /// Document key (filename without extension)
        key: String,

        /// Print the body too
        #[arg(short, long)]
        body: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// List every tag
    Tags,

    /// List documents related to a document by shared tags
    Related {
        /// Document key
        key: String,

        /// Maximum number of documents (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let mut cfg = config::load_config()?;
        if let Some(dir) = self.content_dir {
            cfg = cfg.with_content_dir(dir);
        }
        let reader = ContentReader::from_config(&cfg);
        let locale = self.locale;

        match self.command {
            Commands::Keys => {
                for key in reader.list_all_keys().await {
                    println!("{}", key);
                }
                Ok(())
            }
            Commands::List {
                featured,
                tag,
                limit,
                json,
            } => list_documents(&reader, featured, tag, limit, json, locale).await,
            Commands::Show { key, body, json } => {
                show_document(&reader, &key, body, json, locale).await
            }
            Commands::Tags => {
                for tag in reader.list_all_tags().await {
                    println!("{}", tag);
                }
                Ok(())
            }
            Commands::Related { key, limit, json } => {
                let docs = match limit {
                    Some(limit) => reader.list_related_documents(&key, limit).await,
                    None => reader.list_related_documents_default(&key).await,
                };
                print_documents(&docs, json, locale)
            }
            Commands::Config => {
                show_config(&cfg);
                Ok(())
            }
        }
    }
}

async fn list_documents(
    reader: &ContentReader,
    featured: bool,
    tag: Option<String>,
    limit: Option<usize>,
    json: bool,
    locale: Locale,
) -> Result<()> {
    let mut docs = match (featured, tag) {
        (_, Some(tag)) => {
            let tagged = reader.list_documents_by_tag(&tag).await;
            if featured {
                tagged.into_iter().filter(|d| d.featured).collect()
            } else {
                tagged
            }
        }
        (true, None) => reader.list_featured_documents().await,
        (false, None) => reader.list_all_documents().await,
    };

    if let Some(limit) = limit {
        docs.truncate(limit);
    }

    print_documents(&docs, json, locale)
}

async fn show_document(
    reader: &ContentReader,
    key: &str,
    body: bool,
    json: bool,
    locale: Locale,
) -> Result<()> {
    let Some(doc) = reader.get_document(key).await else {
        anyhow::bail!("Document not found: {}", key);
    };

    if json {
        return print_json(&doc);
    }

    println!("Key:         {}", doc.key);
    println!("Title:       {}", doc.title);
    println!("Description: {}", doc.description);
    println!("Published:   {}", format_date(&doc.publish_date, locale));
    println!("Read time:   {} ({} words)", doc.read_time, doc.read_time.words);
    println!("Featured:    {}", doc.featured);
    if !doc.tags.is_empty() {
        println!("Tags:        {}", doc.tags.join(", "));
    }
    if let Some(ref author) = doc.author {
        println!("Author:      {}", author);
    }
    if let Some(ref thumbnail) = doc.thumbnail {
        println!("Thumbnail:   {}", thumbnail);
    }

    if body {
        println!();
        println!("{}", doc.body);
    }

    Ok(())
}

fn print_documents(docs: &[ContentDocument], json: bool, locale: Locale) -> Result<()> {
    if json {
        return print_json(&docs);
    }

    if docs.is_empty() {
        println!("No documents found");
        return Ok(());
    }

    println!("{:<32} {:<20} {:<12} TITLE", "KEY", "PUBLISHED", "READ");
    println!("{}", "-".repeat(90));

    for doc in docs {
        let marker = if doc.featured { "*" } else { "" };
        println!(
            "{:<32} {:<20} {:<12} {}{}",
            doc.key,
            format_date(&doc.publish_date, locale),
            doc.read_time.to_string(),
            doc.title,
            marker
        );
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn show_config(cfg: &ResolvedConfig) {
    println!(
        "Config file:      {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Content dir:      {}", cfg.content_dir.display());
    println!("Extensions:       {}", cfg.extensions.join(", "));
    println!("Exclude:          {}", cfg.exclude.join(", "));
    println!("Words per minute: {}", cfg.words_per_minute);
    println!("Related limit:    {}", cfg.related_limit);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_command() {
        let cli = Cli::try_parse_from([
            "folio", "--locale", "th", "list", "--featured", "--tag", "ux", "--json",
        ])
        .unwrap();

        assert_eq!(cli.locale, Locale::Thai);
        match cli.command {
            Commands::List {
                featured,
                tag,
                limit,
                json,
            } => {
                assert!(featured);
                assert_eq!(tag.as_deref(), Some("ux"));
                assert_eq!(limit, None);
                assert!(json);
            }
            other => panic!("Expected List, got {:?}", other),
        }
    }

    #[test]
    fn test_global_content_dir_after_subcommand() {
        let cli =
            Cli::try_parse_from(["folio", "related", "a", "--content-dir", "/tmp/blog"]).unwrap();
        assert_eq!(cli.content_dir, Some(PathBuf::from("/tmp/blog")));
        assert_eq!(cli.locale, Locale::English);
    }
}
