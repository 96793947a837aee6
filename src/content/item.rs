//! Content item, category and content type models

use chrono::{DateTime, Local};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A published piece of content as handed out by a content store.
///
/// Items are read-only snapshots; renderers never mutate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Store-wide unique id
    pub id: u64,

    /// Content type name (e.g. `post`, `page`)
    pub post_type: String,

    /// Item title
    pub title: String,

    /// URL-friendly name
    pub slug: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Excerpt, or the full body when no excerpt exists.
    /// Already sanitized by the store.
    pub excerpt_or_body: String,

    /// Full permalink URL
    pub permalink_url: String,

    /// Featured image URL
    pub thumbnail_url: Option<String>,

    /// Category names, in assignment order
    pub taxonomy_labels: Vec<String>,

    /// Category ids, parallel to `taxonomy_labels`
    pub category_ids: Vec<u64>,

    /// Category slugs, parallel to `taxonomy_labels`
    #[serde(default)]
    pub category_slugs: Vec<String>,

    /// Classes for the item's wrapper element
    pub css_classes: IndexSet<String>,
}

impl ContentItem {
    /// Create an item with minimal required fields
    pub fn new(id: u64, post_type: &str, title: &str, date: DateTime<Local>) -> Self {
        Self {
            id,
            post_type: post_type.to_string(),
            title: title.to_string(),
            slug: slug::slugify(title),
            date,
            excerpt_or_body: String::new(),
            permalink_url: String::new(),
            thumbnail_url: None,
            taxonomy_labels: Vec::new(),
            category_ids: Vec::new(),
            category_slugs: Vec::new(),
            css_classes: IndexSet::new(),
        }
    }

    /// Whether the item is filed under the given category id
    pub fn in_category(&self, id: u64) -> bool {
        self.category_ids.contains(&id)
    }

    /// File the item under `category`, once
    pub fn file_under(&mut self, category: &Category) {
        if self.in_category(category.id) {
            return;
        }
        self.category_ids.push(category.id);
        self.taxonomy_labels.push(category.name.clone());
        self.category_slugs.push(category.slug.clone());
    }

    /// `(label, slug)` of each category, in assignment order
    pub fn categories(&self) -> impl Iterator<Item = (&str, &str)> {
        self.taxonomy_labels
            .iter()
            .map(String::as_str)
            .zip(self.category_slugs.iter().map(String::as_str))
    }

    /// Whether the item has the given content type (case-insensitive)
    pub fn is_type(&self, name: &str) -> bool {
        self.post_type.eq_ignore_ascii_case(name)
    }

    /// Recompute `css_classes` from the item's own fields.
    ///
    /// `extra` classes are appended after the derived ones.
    pub fn refresh_classes(&mut self, extra: &[String]) {
        let mut classes = post_classes(
            self.id,
            &self.post_type,
            self.thumbnail_url.is_some(),
            &self.category_slugs,
        );
        for class in extra {
            let class = class.trim();
            if !class.is_empty() {
                classes.insert(class.to_string());
            }
        }
        self.css_classes = classes;
    }
}

/// Build the wrapper classes a post gets from the host CMS
pub fn post_classes(
    id: u64,
    post_type: &str,
    has_thumbnail: bool,
    category_slugs: &[String],
) -> IndexSet<String> {
    let mut classes = IndexSet::new();
    classes.insert(format!("post-{}", id));
    classes.insert(post_type.to_string());
    classes.insert(format!("type-{}", post_type));
    classes.insert("status-publish".to_string());
    if has_thumbnail {
        classes.insert("has-post-thumbnail".to_string());
    }
    classes.insert("hentry".to_string());
    for slug in category_slugs {
        classes.insert(format!("category-{}", slug));
    }
    classes
}

/// A category items can be filed under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub count: usize,
}

impl Category {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            slug: slug::slugify(name),
            count: 0,
        }
    }

    /// Whether a name or slug reference points at this category
    pub fn matches(&self, reference: &str) -> bool {
        let reference = reference.trim();
        self.name.eq_ignore_ascii_case(reference) || self.slug.eq_ignore_ascii_case(reference)
    }
}

/// A content type exposed by the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentType {
    /// Machine name (`post`)
    pub name: String,
    /// Human label (`Posts`)
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_classes_order() {
        let classes = post_classes(12, "post", true, &["news".to_string()]);
        let joined: Vec<_> = classes.iter().map(String::as_str).collect();
        assert_eq!(
            joined,
            vec![
                "post-12",
                "post",
                "type-post",
                "status-publish",
                "has-post-thumbnail",
                "hentry",
                "category-news"
            ]
        );
    }

    #[test]
    fn test_refresh_classes_without_thumbnail() {
        let mut item = ContentItem::new(3, "page", "About", Local::now());
        item.refresh_classes(&["featured".to_string(), "  ".to_string()]);
        assert!(!item.css_classes.contains("has-post-thumbnail"));
        assert_eq!(item.css_classes.last().map(String::as_str), Some("featured"));
    }

    #[test]
    fn test_file_under_keeps_category_slug() {
        let mut cases = Category::new(7, "Case Studies");
        cases.slug = "cases".to_string();

        let mut item = ContentItem::new(1, "post", "Hello", Local::now());
        item.file_under(&cases);
        item.file_under(&cases);
        item.refresh_classes(&[]);

        assert_eq!(item.category_ids, vec![7]);
        assert_eq!(item.categories().collect::<Vec<_>>(), vec![("Case Studies", "cases")]);
        assert!(item.css_classes.contains("category-cases"));
        assert!(!item.css_classes.contains("category-case-studies"));
    }

    #[test]
    fn test_category_matches_name_or_slug() {
        let category = Category::new(4, "Case Studies");
        assert!(category.matches("case studies"));
        assert!(category.matches("case-studies"));
        assert!(!category.matches("News"));
    }
}
