//! Content module - content items, categories and their loading

mod frontmatter;
mod item;
pub mod loader;
mod markdown;

pub use frontmatter::FrontMatter;
pub use item::{post_classes, Category, ContentItem, ContentType};
pub use markdown::MarkdownRenderer;
