//! List query built from block attributes

use serde_json::Value;
use std::num::NonZeroUsize;

use super::Attributes;
use crate::store::{CategoryRef, Selector};

/// Attribute key of the selected category
pub const SELECTED_CATEGORY: &str = "selectedCategory";
/// Attribute key of the selected content type
pub const SELECTED_TYPE: &str = "selectedType";
/// Attribute key of the page size
pub const POSTS_PER_PAGE: &str = "postsPerPage";

/// Number of items a listing shows.
///
/// Anything that is not a positive integer means "use the store default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSize(Option<NonZeroUsize>);

impl PageSize {
    /// The store decides
    pub const DEFAULT: PageSize = PageSize(None);

    pub fn new(limit: usize) -> Self {
        Self(NonZeroUsize::new(limit))
    }

    /// Leniently read a stored attribute (number or numeric string)
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_u64() {
                Some(n) => Self::new(usize::try_from(n).unwrap_or(usize::MAX)),
                None => Self::DEFAULT,
            },
            Value::String(s) => Self::parse(s),
            _ => Self::DEFAULT,
        }
    }

    /// Leniently read a page size typed into a text field
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<usize>() {
            Ok(n) => Self::new(n),
            Err(_) => Self::DEFAULT,
        }
    }

    /// The explicit limit, if any
    pub fn limit(&self) -> Option<usize> {
        self.0.map(NonZeroUsize::get)
    }
}

/// Content type selection of the search listing.
///
/// "All" is recognised in any letter case and selects the store's default
/// type; named types are kept lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostTypeChoice {
    #[default]
    All,
    Named(String),
}

impl PostTypeChoice {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            PostTypeChoice::All
        } else {
            PostTypeChoice::Named(raw.to_lowercase())
        }
    }

    /// Value written back into the block attributes
    pub fn as_attribute(&self) -> &str {
        match self {
            PostTypeChoice::All => "All",
            PostTypeChoice::Named(name) => name,
        }
    }
}

/// What a listing block asks the store for
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub category: Option<CategoryRef>,
    pub post_type: PostTypeChoice,
    pub page_size: PageSize,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_post_type(mut self, post_type: &str) -> Self {
        self.post_type = PostTypeChoice::parse(post_type);
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Build a query from stored block attributes.
    ///
    /// Never fails: unreadable values fall back to their defaults.
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let category = attributes.get(SELECTED_CATEGORY).and_then(|v| match v {
            Value::Number(n) => n.as_u64().map(CategoryRef::Id),
            Value::String(s) => CategoryRef::parse(s),
            _ => None,
        });

        let post_type = attributes
            .get(SELECTED_TYPE)
            .and_then(Value::as_str)
            .map(PostTypeChoice::parse)
            .unwrap_or_default();

        let page_size = attributes
            .get(POSTS_PER_PAGE)
            .map(PageSize::from_value)
            .unwrap_or_default();

        Self {
            category,
            post_type,
            page_size,
        }
    }

    /// Write the query back as block attributes
    pub fn to_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        if let Some(category) = &self.category {
            attributes.insert(
                SELECTED_CATEGORY.to_string(),
                Value::String(category.to_string()),
            );
        }
        attributes.insert(
            SELECTED_TYPE.to_string(),
            Value::String(self.post_type.as_attribute().to_string()),
        );
        if let Some(limit) = self.page_size.limit() {
            attributes.insert(POSTS_PER_PAGE.to_string(), Value::String(limit.to_string()));
        }
        attributes
    }

    /// The one selection mode this query uses; a category wins over a type
    pub fn selector(&self) -> Selector {
        match (&self.category, &self.post_type) {
            (Some(category), _) => Selector::Category(category.clone()),
            (None, PostTypeChoice::Named(name)) => Selector::PostType(name.clone()),
            (None, PostTypeChoice::All) => Selector::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_page_size_lenient() {
        assert_eq!(PageSize::parse("3").limit(), Some(3));
        assert_eq!(PageSize::parse(" 4 ").limit(), Some(4));
        assert_eq!(PageSize::parse("abc"), PageSize::DEFAULT);
        assert_eq!(PageSize::parse("0"), PageSize::DEFAULT);
        assert_eq!(PageSize::parse("-1"), PageSize::DEFAULT);
        assert_eq!(PageSize::from_value(&json!(2)).limit(), Some(2));
        assert_eq!(PageSize::from_value(&json!(-2)), PageSize::DEFAULT);
        assert_eq!(PageSize::from_value(&json!(2.5)), PageSize::DEFAULT);
        assert_eq!(PageSize::from_value(&json!(null)), PageSize::DEFAULT);
    }

    #[test]
    fn test_post_type_all_any_case() {
        assert_eq!(PostTypeChoice::parse("All"), PostTypeChoice::All);
        assert_eq!(PostTypeChoice::parse("all"), PostTypeChoice::All);
        assert_eq!(PostTypeChoice::parse("ALL"), PostTypeChoice::All);
        assert_eq!(
            PostTypeChoice::parse("Page"),
            PostTypeChoice::Named("page".to_string())
        );
    }

    #[test]
    fn test_from_attributes() {
        let query = ListQuery::from_attributes(&attrs(json!({
            "selectedCategory": "1",
            "postsPerPage": "2"
        })));
        assert_eq!(query.category, Some(CategoryRef::Id(1)));
        assert_eq!(query.page_size.limit(), Some(2));
        assert_eq!(query.selector(), Selector::Category(CategoryRef::Id(1)));
    }

    #[test]
    fn test_malformed_page_size_equals_absent() {
        let malformed = ListQuery::from_attributes(&attrs(json!({ "postsPerPage": "abc" })));
        let absent = ListQuery::from_attributes(&attrs(json!({})));
        assert_eq!(malformed, absent);
    }

    #[test]
    fn test_selector_modes() {
        assert_eq!(ListQuery::new().selector(), Selector::Default);
        assert_eq!(
            ListQuery::new().with_post_type("Page").selector(),
            Selector::PostType("page".to_string())
        );
        assert_eq!(
            ListQuery::new()
                .with_post_type("page")
                .with_category(CategoryRef::Name("news".to_string()))
                .selector(),
            Selector::Category(CategoryRef::Name("news".to_string()))
        );
    }

    #[test]
    fn test_attributes_round_trip() {
        let query = ListQuery::new()
            .with_category(CategoryRef::Id(3))
            .with_page_size(PageSize::new(4));
        assert_eq!(ListQuery::from_attributes(&query.to_attributes()), query);
    }
}
