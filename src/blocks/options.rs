//! Editor-side option loading and query building
//!
//! The editor shows a picker of categories or content types. The option
//! list is fetched from the store once and memoized in a single-assignment
//! cell: concurrent loads wait on the one in flight instead of racing to
//! write the result. A failed fetch leaves the cell empty, so the next load
//! retries.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tokio::sync::OnceCell;

use super::query::{ListQuery, PageSize, PostTypeChoice};
use crate::config::excludes_type;
use crate::store::{CategoryRef, ContentStore, StoreError};

/// Editor text while options are loading
pub const LOADING_TEXT: &str = "Loading...";
/// Editor text when the store has no categories
pub const NO_CATEGORIES_TEXT: &str = "No categories found. Please create some!";

/// What a picker lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    Categories,
    PostTypes,
}

impl std::str::FromStr for OptionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "categories" | "category" => Ok(OptionKind::Categories),
            "types" | "type" | "post-types" | "postTypes" => Ok(OptionKind::PostTypes),
            other => Err(format!(
                "Unknown option kind: {}. Available: categories, types",
                other
            )),
        }
    }
}

/// One entry of a picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value stored in the block attributes
    pub value: String,
    /// Text shown to the author
    pub label: String,
}

/// Observable state of an options loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<'a> {
    Pending,
    Ready(&'a [SelectOption]),
    Failed(String),
}

/// Fetches a picker's options once
#[derive(Debug)]
pub struct OptionsLoader {
    kind: OptionKind,
    excluded_types: Vec<String>,
    options: OnceCell<Vec<SelectOption>>,
    last_error: Mutex<Option<String>>,
}

impl OptionsLoader {
    pub fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            excluded_types: Vec::new(),
            options: OnceCell::new(),
            last_error: Mutex::new(None),
        }
    }

    /// Hide content types whose name or label is listed
    pub fn with_excluded_types(mut self, excluded: &[String]) -> Self {
        self.excluded_types = excluded.to_vec();
        self
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Load the options, or return the ones already loaded.
    ///
    /// Only one fetch runs at a time; callers arriving meanwhile get its
    /// result. On failure the error is recorded and nothing is stored.
    pub async fn load(&self, store: &dyn ContentStore) -> Result<&[SelectOption], StoreError> {
        let result = self
            .options
            .get_or_try_init(|| async { self.fetch(store) })
            .await;

        match result {
            Ok(options) => {
                self.set_error(None);
                Ok(options.as_slice())
            }
            Err(e) => {
                tracing::warn!("Loading {:?} options failed: {}", self.kind, e);
                self.set_error(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Current state without triggering a fetch
    pub fn state(&self) -> LoadState<'_> {
        if let Some(options) = self.options.get() {
            return LoadState::Ready(options.as_slice());
        }
        match self.last_error() {
            Some(error) => LoadState::Failed(error),
            None => LoadState::Pending,
        }
    }

    fn fetch(&self, store: &dyn ContentStore) -> Result<Vec<SelectOption>, StoreError> {
        let options: Vec<SelectOption> = match self.kind {
            OptionKind::Categories => store
                .list_categories()?
                .into_iter()
                .map(|c| SelectOption {
                    value: c.id.to_string(),
                    label: c.name,
                })
                .collect(),
            OptionKind::PostTypes => store
                .list_content_types()?
                .into_iter()
                .filter(|t| !excludes_type(&self.excluded_types, &t.name, &t.label))
                .map(|t| SelectOption {
                    value: t.name,
                    label: t.label,
                })
                .collect(),
        };
        tracing::debug!("Fetched {} {:?} options", options.len(), self.kind);
        Ok(options)
    }

    fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn set_error(&self, error: Option<String>) {
        match self.last_error.lock() {
            Ok(mut guard) => *guard = error,
            Err(poisoned) => *poisoned.into_inner() = error,
        }
    }
}

/// Editor-side state of a listing block: its picker and current selection
#[derive(Debug)]
pub struct ListQueryBuilder {
    options: OptionsLoader,
    query: ListQuery,
}

impl ListQueryBuilder {
    /// Builder for a category-driven listing
    pub fn for_categories() -> Self {
        Self {
            options: OptionsLoader::new(OptionKind::Categories),
            query: ListQuery::new(),
        }
    }

    /// Builder for a type-driven listing
    pub fn for_post_types(excluded: &[String]) -> Self {
        Self {
            options: OptionsLoader::new(OptionKind::PostTypes).with_excluded_types(excluded),
            query: ListQuery::new(),
        }
    }

    /// Start from previously stored attributes
    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    /// Fetch the picker's options (no-op once loaded)
    pub async fn load_options(
        &self,
        store: &dyn ContentStore,
    ) -> Result<&[SelectOption], StoreError> {
        self.options.load(store).await
    }

    pub fn options(&self) -> &OptionsLoader {
        &self.options
    }

    /// Record the picked value
    pub fn set_selection(&mut self, value: &str) {
        match self.options.kind() {
            OptionKind::Categories => self.query.category = CategoryRef::parse(value),
            OptionKind::PostTypes => self.query.post_type = PostTypeChoice::parse(value),
        }
    }

    /// Record the page size as typed
    pub fn set_page_size(&mut self, raw: &str) {
        self.query.page_size = PageSize::parse(raw);
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn build(&self) -> ListQuery {
        self.query.clone()
    }

    /// Text the editor shows instead of the picker, if any
    pub fn status_text(&self) -> Option<String> {
        match self.options.state() {
            LoadState::Pending => Some(LOADING_TEXT.to_string()),
            LoadState::Failed(error) => Some(format!("Could not load options: {}", error)),
            LoadState::Ready([]) if self.options.kind() == OptionKind::Categories => {
                Some(NO_CATEGORIES_TEXT.to_string())
            }
            LoadState::Ready(_) => None,
        }
    }
}
