//! URL helper functions

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

use crate::config::LibraryConfig;

/// Characters escaped in a path segment (RFC 3986 unreserved stay as-is)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/category/news/") // -> "/blog/category/news/"
/// ```
pub fn url_for(config: &LibraryConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/hello-world/") // -> "https://example.com/blog/hello-world/"
/// ```
pub fn full_url_for(config: &LibraryConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Archive URL of a category
pub fn category_url(config: &LibraryConfig, slug: &str) -> String {
    url_for(
        config,
        &format!("{}/{}/", config.category_dir, encode_url(slug)),
    )
}

/// Encode a URL path segment
pub fn encode_url(path: &str) -> String {
    percent_encoding::utf8_percent_encode(path, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LibraryConfig {
        let mut config = LibraryConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/img/a.png"), "/blog/img/a.png");
        assert_eq!(url_for(&config, "about/"), "/blog/about/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/about/"),
            "https://example.com/blog/about/"
        );
    }

    #[test]
    fn test_category_url_encodes_slug() {
        let config = test_config();
        assert_eq!(category_url(&config, "news"), "/blog/category/news/");
        assert_eq!(category_url(&config, "a b"), "/blog/category/a%20b/");
    }
}
