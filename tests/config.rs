//! Config Integration Tests
//!
//! Tests that a discovered config file drives the reader.

use folio::config::load_config_from;
use folio::ContentReader;
use tempfile::TempDir;

#[tokio::test]
async fn test_reader_from_discovered_config() {
    let temp = TempDir::new().unwrap();
    let site = temp.path();

    std::fs::create_dir_all(site.join(".folio")).unwrap();
    std::fs::write(
        site.join(".folio").join("config.yaml"),
        "version: \"1.0\"\ncontent:\n  dir: posts\n  extensions: [md]\nrelated:\n  limit: 1\n",
    )
    .unwrap();

    let posts = site.join("posts");
    std::fs::create_dir_all(&posts).unwrap();
    std::fs::write(
        posts.join("one.md"),
        "---\ntitle: One\ndescription: first\ndate: 2023-01-01\ntags: [ux]\n---\n",
    )
    .unwrap();
    std::fs::write(
        posts.join("two.md"),
        "---\ntitle: Two\ndescription: second\ndate: 2023-02-01\ntags: [ux]\n---\n",
    )
    .unwrap();
    std::fs::write(
        posts.join("three.md"),
        "---\ntitle: Three\ndescription: third\ndate: 2023-03-01\ntags: [ux]\n---\n",
    )
    .unwrap();
    // Not an accepted extension under this config
    std::fs::write(
        posts.join("four.mdx"),
        "---\ntitle: Four\ndescription: fourth\ntags: [ux]\n---\n",
    )
    .unwrap();

    let nested = site.join("src").join("pages");
    std::fs::create_dir_all(&nested).unwrap();

    let config = load_config_from(&nested).unwrap();
    assert!(config.config_file.is_some());

    let reader = ContentReader::from_config(&config);
    assert_eq!(reader.list_all_keys().await, vec!["one", "three", "two"]);

    let related = reader.list_related_documents_default("one").await;
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].key, "three");
}
