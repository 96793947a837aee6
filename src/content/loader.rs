//! Content loader - loads content items from the content directory

use anyhow::Result;
use chrono::{DateTime, Local};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Category, ContentItem, FrontMatter, MarkdownRenderer};
use crate::config::LibraryConfig;
use crate::helpers::{full_url_for, url_for};

/// Items and categories read from disk
#[derive(Debug, Clone, Default)]
pub struct LoadedContent {
    /// Items sorted newest first
    pub items: Vec<ContentItem>,
    /// Categories in id order
    pub categories: Vec<Category>,
}

/// One parsed file, before ids are assigned
struct Draft {
    front: FrontMatter,
    title: String,
    slug: String,
    date: DateTime<Local>,
    source: String,
    excerpt_or_body: String,
}

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    config: &'a LibraryConfig,
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a LibraryConfig, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load every published item and the categories they use
    pub fn load(&self) -> Result<LoadedContent> {
        if !self.content_dir.exists() {
            tracing::debug!("Content directory {:?} missing", self.content_dir);
            return Ok(LoadedContent {
                items: Vec::new(),
                categories: self.seed_categories(&BTreeSet::new()),
            });
        }

        let mut drafts = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_draft(path) {
                    Ok(draft) if draft.front.published => drafts.push(draft),
                    Ok(draft) => tracing::debug!("Skipping unpublished {}", draft.source),
                    Err(e) => {
                        tracing::warn!("Failed to load content {:?}: {}", path, e);
                    }
                }
            }
        }

        // Oldest first, so automatic ids grow with age
        drafts.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.source.cmp(&b.source)));

        let default_category = self.config.default_category.clone();
        let used_names: BTreeSet<String> = drafts
            .iter()
            .flat_map(|d| d.front.categories.iter().cloned())
            .chain(std::iter::once(default_category.clone()))
            .collect();
        let mut categories = self.seed_categories(&used_names);

        let mut taken: HashSet<u64> = drafts.iter().filter_map(|d| d.front.id).collect();
        let mut next_id = 1;

        let mut items = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = match draft.front.id {
                Some(id) => id,
                None => {
                    while taken.contains(&next_id) {
                        next_id += 1;
                    }
                    taken.insert(next_id);
                    next_id
                }
            };
            let post_type = draft
                .front
                .post_type
                .clone()
                .unwrap_or_else(|| self.config.default_post_type.clone())
                .to_lowercase();

            let mut item = ContentItem::new(id, &post_type, &draft.title, draft.date);
            item.slug = draft.slug;
            item.excerpt_or_body = draft.excerpt_or_body;
            item.thumbnail_url = draft
                .front
                .thumbnail
                .as_deref()
                .map(|t| self.asset_url(t));
            item.permalink_url = self.permalink(&item);

            let names = if draft.front.categories.is_empty() {
                vec![default_category.clone()]
            } else {
                draft.front.categories.clone()
            };
            for name in names {
                if let Some(category) = categories.iter_mut().find(|c| c.matches(&name)) {
                    if !item.in_category(category.id) {
                        category.count += 1;
                        item.file_under(category);
                    }
                }
            }
            item.refresh_classes(&draft.front.classes);
            items.push(item);
        }

        // Newest first is the store's native order
        items.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        categories.retain(|c| c.count > 0 || self.is_seeded(c.id));

        tracing::info!(
            "Loaded {} items in {} categories",
            items.len(),
            categories.len()
        );

        Ok(LoadedContent { items, categories })
    }

    /// Parse a single file
    fn load_draft(&self, path: &Path) -> Result<Draft> {
        let content = fs::read_to_string(path)?;
        let (front, body) = FrontMatter::parse(&content)?;

        let file_modified = fs::metadata(path)?
            .modified()
            .ok()
            .map(DateTime::<Local>::from);
        let date = front
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();
        let title = front.title.clone().unwrap_or_else(|| stem.clone());
        let slug = front
            .slug
            .clone()
            .unwrap_or_else(|| slug::slugify(&stem));

        let source = path
            .strip_prefix(&self.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let excerpt_or_body = match &front.excerpt {
            Some(excerpt) => self.renderer.render(excerpt)?.trim().to_string(),
            None => {
                let (excerpt_md, full_md) = MarkdownRenderer::split_excerpt(body);
                let markdown = excerpt_md.unwrap_or(full_md);
                self.renderer.render(&markdown)?.trim().to_string()
            }
        };

        Ok(Draft {
            front,
            title,
            slug,
            date,
            source,
            excerpt_or_body,
        })
    }

    /// Seeded categories plus one entry for every other name in use
    fn seed_categories(&self, used_names: &BTreeSet<String>) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .config
            .categories
            .iter()
            .map(|seed| {
                let mut category = Category::new(seed.id, &seed.name);
                if let Some(slug) = &seed.slug {
                    category.slug = slug.clone();
                }
                category
            })
            .collect();

        let mut next_id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        for name in used_names {
            if !categories.iter().any(|c| c.matches(name)) {
                categories.push(Category::new(next_id, name));
                next_id += 1;
            }
        }

        categories.sort_by_key(|c| c.id);
        categories
    }

    fn is_seeded(&self, id: u64) -> bool {
        self.config.categories.iter().any(|seed| seed.id == id)
    }

    /// Permalink of an item: `/:slug/` for pages, `/:type/:slug/` for other non-post types
    fn permalink(&self, item: &ContentItem) -> String {
        let path = if item.is_type(&self.config.default_post_type) || item.is_type("page") {
            format!("{}/", item.slug)
        } else {
            format!("{}/{}/", item.post_type, item.slug)
        };
        full_url_for(self.config, &path)
    }

    fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
        {
            path.to_string()
        } else {
            url_for(self.config, path)
        }
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategorySeed;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let config = LibraryConfig::default();
        let loader = ContentLoader::new(&config, "/nonexistent/content");
        let loaded = loader.load().unwrap();
        assert!(loaded.items.is_empty());
    }

    #[test]
    fn test_load_orders_newest_first_and_assigns_ids() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.md",
            "---\ntitle: Alpha\ndate: 2024-01-01\ncategories: News\n---\nFirst",
        );
        write(
            dir.path(),
            "b.md",
            "---\ntitle: Beta\ndate: 2024-02-01\ncategories: News\nthumbnail: /img/b.png\n---\nSecond",
        );
        write(
            dir.path(),
            "c.md",
            "---\ntitle: Gamma\ndate: 2024-03-01\npublished: false\n---\nHidden",
        );

        let config = LibraryConfig::default();
        let loaded = ContentLoader::new(&config, dir.path()).load().unwrap();

        let titles: Vec<_> = loaded.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Beta", "Alpha"]);
        assert_eq!(loaded.items[1].id, 1);
        assert_eq!(loaded.items[0].id, 2);
        assert_eq!(
            loaded.items[0].thumbnail_url.as_deref(),
            Some("/img/b.png")
        );
        assert!(loaded.items[0].css_classes.contains("category-news"));
        assert_eq!(loaded.items[0].permalink_url, "http://example.com/b/");

        let news = loaded.categories.iter().find(|c| c.name == "News").unwrap();
        assert_eq!(news.count, 2);
    }

    #[test]
    fn test_seeded_category_ids_and_default_category() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.md",
            "---\nid: 1\ntitle: Filed\ndate: 2024-01-01\ncategories: News\n---\nBody",
        );
        write(dir.path(), "b.md", "---\ntitle: Loose\ndate: 2024-01-02\n---\nBody");

        let mut config = LibraryConfig::default();
        config.categories = vec![CategorySeed {
            id: 9,
            name: "News".to_string(),
            slug: None,
        }];
        let loaded = ContentLoader::new(&config, dir.path()).load().unwrap();

        let filed = loaded.items.iter().find(|i| i.title == "Filed").unwrap();
        assert_eq!(filed.category_ids, vec![9]);

        let loose = loaded.items.iter().find(|i| i.title == "Loose").unwrap();
        assert_eq!(loose.id, 2);
        assert_eq!(loose.taxonomy_labels, vec!["Uncategorized"]);
        assert_eq!(loose.category_ids, vec![10]);
    }

    #[test]
    fn test_configured_slug_reaches_listing() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "study.md",
            "---\ntitle: Study\ndate: 2024-01-01\ncategories: Case Studies\n---\nBody",
        );

        let mut config = LibraryConfig::default();
        config.categories = vec![CategorySeed {
            id: 7,
            name: "Case Studies".to_string(),
            slug: Some("cases".to_string()),
        }];
        let loaded = ContentLoader::new(&config, dir.path()).load().unwrap();
        assert!(loaded.items[0].css_classes.contains("category-cases"));

        let store = crate::store::MemoryStore::from_loaded(&config, loaded);
        let query = crate::blocks::ListQuery::new()
            .with_category(crate::store::CategoryRef::Name("cases".to_string()));
        let html = crate::blocks::ListingRenderer::new(&config)
            .render(&query, &store, crate::blocks::FragmentStyle::Plain)
            .into_string();
        assert!(html.contains(r#"class="post-1 post type-post status-publish hentry category-cases""#));
        assert!(html.contains(r#"<a href="/category/cases/" rel="category tag">Case Studies</a>"#));
        assert!(!html.contains("case-studies"));
    }

    #[test]
    fn test_category_names_match_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.md",
            "---\ntitle: Lower\ndate: 2024-01-01\ncategories: news\n---\nBody",
        );
        write(
            dir.path(),
            "b.md",
            "---\ntitle: Twice\ndate: 2024-01-02\ncategories: [News, NEWS]\n---\nBody",
        );

        let mut config = LibraryConfig::default();
        config.categories = vec![CategorySeed {
            id: 2,
            name: "News".to_string(),
            slug: None,
        }];
        let loaded = ContentLoader::new(&config, dir.path()).load().unwrap();

        let news: Vec<_> = loaded
            .categories
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case("news"))
            .collect();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].id, 2);
        assert_eq!(news[0].count, 2);
        for item in &loaded.items {
            assert_eq!(item.category_ids, vec![2]);
            assert_eq!(item.taxonomy_labels, vec!["News"]);
        }
    }

    #[test]
    fn test_excerpt_precedence() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.md",
            "---\ntitle: A\ndate: 2024-01-01\nexcerpt: Custom *summary*\n---\nBody",
        );
        write(
            dir.path(),
            "b.md",
            "---\ntitle: B\ndate: 2024-01-02\n---\nLead\n<!-- more -->\nRest",
        );
        write(dir.path(), "c.md", "---\ntitle: C\ndate: 2024-01-03\n---\nWhole body");

        let config = LibraryConfig::default();
        let loaded = ContentLoader::new(&config, dir.path()).load().unwrap();
        let by_title = |t: &str| loaded.items.iter().find(|i| i.title == t).unwrap();

        assert_eq!(by_title("A").excerpt_or_body, "<p>Custom <em>summary</em></p>");
        assert_eq!(by_title("B").excerpt_or_body, "<p>Lead</p>");
        assert_eq!(by_title("C").excerpt_or_body, "<p>Whole body</p>");
    }
}
