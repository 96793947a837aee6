//! List helper functions

use super::html::{esc_attr, html_escape};
use super::url::category_url;
use crate::config::LibraryConfig;

/// Generate the inline category links of one item from `(label, slug)` pairs
///
/// # Examples
/// ```ignore
/// category_list(&config, [("News", "news")], ", ")
/// // -> <a href="/category/news/" rel="category tag">News</a>
/// ```
pub fn category_list<'a, I>(config: &LibraryConfig, categories: I, separator: &str) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    categories
        .into_iter()
        .map(|(name, slug)| {
            let url = category_url(config, slug);
            format!(
                r#"<a href="{}" rel="category tag">{}</a>"#,
                esc_attr(&url),
                html_escape(name)
            )
        })
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_list_joins_in_order() {
        let config = LibraryConfig::default();
        let categories = [("News", "news"), ("Case Studies", "cases")];
        assert_eq!(
            category_list(&config, categories, ", "),
            r#"<a href="/category/news/" rel="category tag">News</a>, <a href="/category/cases/" rel="category tag">Case Studies</a>"#
        );
    }

    #[test]
    fn test_category_list_empty() {
        let config = LibraryConfig::default();
        assert_eq!(category_list(&config, Vec::<(&str, &str)>::new(), ", "), "");
    }
}
