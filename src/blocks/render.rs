//! Post listing renderer
//!
//! One renderer serves every listing block. The store decides which items
//! match and in what order; the renderer keeps that order and turns each
//! item into an entry of the chosen [`FragmentStyle`].

use serde::{Deserialize, Serialize};

use super::{Fragment, ListQuery};
use crate::config::LibraryConfig;
use crate::content::ContentItem;
use crate::helpers::{category_list, class_attr, html_escape, link_to, thumbnail_tag};
use crate::store::ContentStore;

/// Presentation of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentStyle {
    /// Title link, category links, thumbnail and excerpt; entries separated by `<hr>`
    Plain,
    /// Title, categories and thumbnail wrapped in the permalink anchor,
    /// categories as text; the excerpt follows the anchor
    Card,
}

impl FragmentStyle {
    fn container_class(&self) -> &'static str {
        match self {
            FragmentStyle::Plain => "mwd-posts",
            FragmentStyle::Card => "mwd-posts-block posts",
        }
    }
}

/// Renders listing blocks against a content store
#[derive(Debug, Clone, Copy)]
pub struct ListingRenderer<'a> {
    config: &'a LibraryConfig,
}

impl<'a> ListingRenderer<'a> {
    pub fn new(config: &'a LibraryConfig) -> Self {
        Self { config }
    }

    /// Render `query` against `store`.
    ///
    /// Store failures degrade to an empty container; this never errors.
    pub fn render(
        &self,
        query: &ListQuery,
        store: &dyn ContentStore,
        style: FragmentStyle,
    ) -> Fragment {
        let selector = query.selector();
        let items = match store.query_items(&selector, query.page_size.limit()) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Listing query {:?} failed, rendering empty: {}", selector, e);
                Vec::new()
            }
        };

        let mut html = format!(r#"<div class="{}">"#, style.container_class());
        for item in &items {
            match style {
                FragmentStyle::Plain => self.push_plain_entry(&mut html, item),
                FragmentStyle::Card => self.push_card_entry(&mut html, item),
            }
        }
        html.push_str("</div>");

        tracing::debug!("Rendered {} entries ({:?})", items.len(), style);
        Fragment::new(html)
    }

    fn push_plain_entry(&self, html: &mut String, item: &ContentItem) {
        html.push_str(&format!(r#"<div class="{}">"#, class_attr(&item.css_classes)));
        html.push_str(&format!(
            "<h2>{}</h2>",
            link_to(&item.permalink_url, &html_escape(&item.title))
        ));
        if !item.taxonomy_labels.is_empty() {
            html.push_str(&format!(
                r#"<div class="entry-categories">{}</div>"#,
                category_list(self.config, item.categories(), ", ")
            ));
        }
        push_thumbnail(html, item);
        push_excerpt(html, item);
        html.push_str("</div><hr>");
    }

    fn push_card_entry(&self, html: &mut String, item: &ContentItem) {
        let mut inner = format!("<h2>{}</h2>", html_escape(&item.title));
        if !item.taxonomy_labels.is_empty() {
            inner.push_str(&format!(
                r#"<div class="entry-categories">{}</div>"#,
                html_escape(&item.taxonomy_labels.join(", "))
            ));
        }
        push_thumbnail(&mut inner, item);

        html.push_str(&format!(
            r#"<div class="{}">{}"#,
            class_attr(&item.css_classes),
            link_to(&item.permalink_url, &inner)
        ));
        // Bodies can carry links; no nested anchors
        push_excerpt(html, item);
        html.push_str("</div>");
    }
}

fn push_thumbnail(html: &mut String, item: &ContentItem) {
    if let Some(src) = item.thumbnail_url.as_deref().filter(|s| !s.is_empty()) {
        html.push_str(&thumbnail_tag(src));
    }
}

fn push_excerpt(html: &mut String, item: &ContentItem) {
    // Store-sanitized; inserted as-is
    if !item.excerpt_or_body.trim().is_empty() {
        html.push_str(&format!(
            r#"<div class="entry-excerpt">{}</div>"#,
            item.excerpt_or_body
        ));
    }
}
