//! Library configuration (_blocks.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    // Library
    pub title: String,
    /// Block namespace, the part before the slash in `namespace/blockname`
    pub namespace: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub category_dir: String,

    // Query defaults
    pub default_post_type: String,
    /// Page size applied when a query carries none
    pub posts_per_page: usize,
    pub default_category: String,

    // Editor options
    /// Content type labels hidden from the post type picker
    pub excluded_post_types: Vec<String>,
    pub content_types: Vec<ContentTypeConfig>,
    #[serde(default)]
    pub categories: Vec<CategorySeed>,

    #[serde(default)]
    pub server: ServerConfig,
}

/// A content type known to the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentTypeConfig {
    pub name: String,
    pub label: String,
}

impl ContentTypeConfig {
    fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
        }
    }
}

/// A category with a fixed id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySeed {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            title: "MWD Block Library".to_string(),
            namespace: "mwd".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            category_dir: "category".to_string(),

            default_post_type: "post".to_string(),
            posts_per_page: 5,
            default_category: "Uncategorized".to_string(),

            excluded_post_types: vec!["Media".to_string(), "Reusable Blocks".to_string()],
            content_types: vec![
                ContentTypeConfig::new("post", "Posts"),
                ContentTypeConfig::new("page", "Pages"),
                ContentTypeConfig::new("attachment", "Media"),
                ContentTypeConfig::new("wp_block", "Reusable Blocks"),
            ],
            categories: Vec::new(),

            server: ServerConfig::default(),
        }
    }
}

impl LibraryConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: LibraryConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Whether a content type is hidden from the editor's type picker
    pub fn is_excluded_type(&self, name: &str, label: &str) -> bool {
        excludes_type(&self.excluded_post_types, name, label)
    }

    /// Fully qualified block name for this namespace
    pub fn block_name(&self, block: &str) -> String {
        format!("{}/{}", self.namespace, block)
    }
}

/// Whether `excluded` names a content type by label or by name
pub fn excludes_type(excluded: &[String], name: &str, label: &str) -> bool {
    excluded.iter().any(|entry| entry == label || entry == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_fields_missing() {
        let config: LibraryConfig = serde_yaml::from_str("title: My Blocks\n").unwrap();
        assert_eq!(config.title, "My Blocks");
        assert_eq!(config.namespace, "mwd");
        assert_eq!(config.posts_per_page, 5);
        assert_eq!(config.content_types.len(), 4);
    }

    #[test]
    fn test_parse_categories_and_types() {
        let yaml = r#"
posts_per_page: 3
content_types:
  - name: post
    label: Posts
  - name: event
    label: Events
categories:
  - id: 1
    name: News
  - id: 7
    name: Case Studies
    slug: cases
"#;
        let config: LibraryConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.posts_per_page, 3);
        assert_eq!(config.content_types[1].label, "Events");
        assert_eq!(config.categories[1].slug.as_deref(), Some("cases"));
    }

    #[test]
    fn test_excluded_type_matches_label_or_name() {
        let config = LibraryConfig::default();
        assert!(config.is_excluded_type("attachment", "Media"));
        assert!(config.is_excluded_type("wp_block", "Reusable Blocks"));
        assert!(!config.is_excluded_type("post", "Posts"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_blocks.yml");
        fs::write(&path, "namespace: acme\n").unwrap();
        let config = LibraryConfig::load(&path).unwrap();
        assert_eq!(config.block_name("posts"), "acme/posts");
    }
}
