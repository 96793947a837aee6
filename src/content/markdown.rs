//! Markdown rendering for item bodies

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

lazy_static! {
    static ref MORE_MARKER: Regex = Regex::new(r"<!--\s*more\s*-->").unwrap();
}

/// Markdown renderer
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    smart_punctuation: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self {
            smart_punctuation: true,
        }
    }

    /// Create with custom settings
    pub fn with_options(smart_punctuation: bool) -> Self {
        Self { smart_punctuation }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front-matter is handled separately in FrontMatter::parse()
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        if self.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(html_output)
    }

    /// Split content at the `<!-- more -->` marker.
    ///
    /// Returns (excerpt, full content without the marker).
    pub fn split_excerpt(content: &str) -> (Option<String>, String) {
        match MORE_MARKER.find(content) {
            Some(marker) => {
                let excerpt = content[..marker.start()].trim().to_string();
                let remaining = content[marker.end()..].trim();
                let full = format!("{}\n\n{}", excerpt, remaining);
                (Some(excerpt), full)
            }
            None => (None, content.to_string()),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_smart_punctuation_toggle() {
        let smart = MarkdownRenderer::new().render("\"Hi\" -- there").unwrap();
        assert!(smart.contains('\u{201c}'));

        let plain = MarkdownRenderer::with_options(false)
            .render("\"Hi\" -- there")
            .unwrap();
        assert!(plain.contains("-- there"));
        assert!(!plain.contains('\u{201c}'));
    }

    #[test]
    fn test_split_excerpt() {
        let content = "This is excerpt.\n<!-- more -->\nThis is more content.";
        let (excerpt, full) = MarkdownRenderer::split_excerpt(content);
        assert_eq!(excerpt, Some("This is excerpt.".to_string()));
        assert!(full.contains("This is excerpt."));
        assert!(full.contains("This is more content."));
        assert!(!full.contains("more -->"));
    }

    #[test]
    fn test_split_excerpt_loose_marker() {
        let (excerpt, _) = MarkdownRenderer::split_excerpt("Intro<!--more-->Rest");
        assert_eq!(excerpt.as_deref(), Some("Intro"));
    }

    #[test]
    fn test_no_marker() {
        let (excerpt, full) = MarkdownRenderer::split_excerpt("Only body");
        assert!(excerpt.is_none());
        assert_eq!(full, "Only body");
    }
}
