//! In-memory content store

use std::path::Path;

use super::{ContentStore, Selector, StoreError};
use crate::config::LibraryConfig;
use crate::content::loader::{ContentLoader, LoadedContent};
use crate::content::{Category, ContentItem, ContentType};

/// Content store over a fixed snapshot of items.
///
/// Items are kept in their native order (newest first when built by the
/// loader) and queries never reorder them.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    items: Vec<ContentItem>,
    categories: Vec<Category>,
    content_types: Vec<ContentType>,
    default_post_type: String,
    default_limit: usize,
}

impl MemoryStore {
    /// Create a store from prepared parts
    pub fn new(
        items: Vec<ContentItem>,
        categories: Vec<Category>,
        content_types: Vec<ContentType>,
    ) -> Self {
        let defaults = LibraryConfig::default();
        Self {
            items,
            categories,
            content_types,
            default_post_type: defaults.default_post_type,
            default_limit: defaults.posts_per_page,
        }
    }

    /// Create a store from loaded content and the library configuration
    pub fn from_loaded(config: &LibraryConfig, loaded: LoadedContent) -> Self {
        let content_types = config
            .content_types
            .iter()
            .map(|t| ContentType {
                name: t.name.clone(),
                label: t.label.clone(),
            })
            .collect();
        Self::new(loaded.items, loaded.categories, content_types)
            .with_default_post_type(&config.default_post_type)
            .with_default_limit(config.posts_per_page)
    }

    /// Load a content directory into a new store
    pub fn load<P: AsRef<Path>>(config: &LibraryConfig, content_dir: P) -> Result<Self, StoreError> {
        let loaded = ContentLoader::new(config, content_dir.as_ref()).load()?;
        Ok(Self::from_loaded(config, loaded))
    }

    /// Set the type selected by [`Selector::Default`]
    pub fn with_default_post_type(mut self, post_type: &str) -> Self {
        self.default_post_type = post_type.to_string();
        self
    }

    /// Set the limit applied when a query has none
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// All items, in store order
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }
}

impl ContentStore for MemoryStore {
    fn list_content_types(&self) -> Result<Vec<ContentType>, StoreError> {
        Ok(self.content_types.clone())
    }

    fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.categories.clone())
    }

    fn query_items(
        &self,
        selector: &Selector,
        limit: Option<usize>,
    ) -> Result<Vec<ContentItem>, StoreError> {
        let limit = limit.unwrap_or(self.default_limit);

        let matched: Vec<ContentItem> = match selector {
            Selector::Category(reference) => match reference.resolve(&self.categories) {
                Some(category) => self
                    .items
                    .iter()
                    .filter(|item| item.in_category(category.id))
                    .take(limit)
                    .cloned()
                    .collect(),
                None => {
                    tracing::debug!("Unknown category {}", reference);
                    Vec::new()
                }
            },
            Selector::PostType(name) => self
                .items
                .iter()
                .filter(|item| item.is_type(name))
                .take(limit)
                .cloned()
                .collect(),
            Selector::Default => self
                .items
                .iter()
                .filter(|item| item.is_type(&self.default_post_type))
                .take(limit)
                .cloned()
                .collect(),
        };

        tracing::debug!(
            "Query {:?} (limit {}) matched {} items",
            selector,
            limit,
            matched.len()
        );
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CategoryRef;
    use chrono::{Local, TimeZone};

    fn item(id: u64, post_type: &str, title: &str, category: Option<&Category>) -> ContentItem {
        let date = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut item = ContentItem::new(id, post_type, title, date);
        if let Some(category) = category {
            item.file_under(category);
        }
        item
    }

    fn store() -> MemoryStore {
        let news = Category::new(1, "News");
        let events = Category::new(2, "Events");
        let items = vec![
            item(10, "post", "A", Some(&news)),
            item(9, "page", "About", None),
            item(8, "post", "B", Some(&news)),
            item(7, "post", "E", Some(&events)),
            item(6, "post", "C", Some(&news)),
        ];
        MemoryStore::new(items, vec![news, events], Vec::new()).with_default_limit(3)
    }

    fn titles(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_category_by_id_preserves_order() {
        let items = store()
            .query_items(&Selector::Category(CategoryRef::Id(1)), Some(2))
            .unwrap();
        assert_eq!(titles(&items), vec!["A", "B"]);
    }

    #[test]
    fn test_category_by_name() {
        let items = store()
            .query_items(
                &Selector::Category(CategoryRef::Name("events".to_string())),
                None,
            )
            .unwrap();
        assert_eq!(titles(&items), vec!["E"]);
    }

    #[test]
    fn test_unknown_category_matches_nothing() {
        let items = store()
            .query_items(&Selector::Category(CategoryRef::Id(99)), None)
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_default_limit_applies() {
        let items = store().query_items(&Selector::Default, None).unwrap();
        assert_eq!(titles(&items), vec!["A", "B", "E"]);
    }

    #[test]
    fn test_post_type_case_insensitive() {
        let items = store()
            .query_items(&Selector::PostType("PAGE".to_string()), None)
            .unwrap();
        assert_eq!(titles(&items), vec!["About"]);
    }
}
