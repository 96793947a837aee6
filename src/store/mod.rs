//! Content store capability
//!
//! Renderers and option loaders never talk to storage directly; they go
//! through [`ContentStore`], which a host CMS (or [`MemoryStore`]) provides.

mod memory;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use memory::MemoryStore;

use crate::content::{Category, ContentItem, ContentType};

/// Content store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Content store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Load(#[from] anyhow::Error),
}

/// A category given either by id or by name/slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(u64),
    Name(String),
}

impl CategoryRef {
    /// Parse a stored attribute value; numeric strings become ids
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        Some(match value.parse::<u64>() {
            Ok(id) => CategoryRef::Id(id),
            Err(_) => CategoryRef::Name(value.to_string()),
        })
    }

    /// Resolve against a category list
    pub fn resolve<'a>(&self, categories: &'a [Category]) -> Option<&'a Category> {
        match self {
            CategoryRef::Id(id) => categories.iter().find(|c| c.id == *id),
            CategoryRef::Name(name) => categories.iter().find(|c| c.matches(name)),
        }
    }
}

impl fmt::Display for CategoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryRef::Id(id) => write!(f, "{}", id),
            CategoryRef::Name(name) => f.write_str(name),
        }
    }
}

/// Which items a query selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Items filed under a category
    Category(CategoryRef),
    /// Items of one content type
    PostType(String),
    /// Items of the store's default content type
    Default,
}

/// Read access to content, categories and content types
pub trait ContentStore: Send + Sync {
    /// All content types, in store order
    fn list_content_types(&self) -> Result<Vec<ContentType>, StoreError>;

    /// All categories, in store order
    fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Items matching `selector`, in store order, at most `limit` of them.
    ///
    /// `None` applies the store's own default limit.
    fn query_items(
        &self,
        selector: &Selector,
        limit: Option<usize>,
    ) -> Result<Vec<ContentItem>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ref_parse() {
        assert_eq!(CategoryRef::parse("12"), Some(CategoryRef::Id(12)));
        assert_eq!(
            CategoryRef::parse(" news "),
            Some(CategoryRef::Name("news".to_string()))
        );
        assert_eq!(CategoryRef::parse("  "), None);
    }

    #[test]
    fn test_category_ref_resolve() {
        let categories = vec![Category::new(1, "News"), Category::new(2, "Case Studies")];
        assert_eq!(
            CategoryRef::Id(2).resolve(&categories).map(|c| c.id),
            Some(2)
        );
        assert_eq!(
            CategoryRef::Name("case-studies".to_string())
                .resolve(&categories)
                .map(|c| c.id),
            Some(2)
        );
        assert!(CategoryRef::Id(5).resolve(&categories).is_none());
    }
}
