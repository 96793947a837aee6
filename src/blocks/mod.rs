//! Editor blocks
//!
//! Query attributes, the post listing renderer in its two styles, the static
//! card block, editor option loading and the block registry.

pub mod card;
pub mod options;
pub mod query;
pub mod registry;
pub mod render;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub use card::CardAttributes;
pub use options::{ListQueryBuilder, LoadState, OptionKind, OptionsLoader, SelectOption};
pub use query::{ListQuery, PageSize, PostTypeChoice};
pub use registry::{register_library_blocks, BlockDefinition, BlockRegistry, RenderContext};
pub use render::{FragmentStyle, ListingRenderer};

/// Stored block attributes, as the editor serializes them
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Block errors surfaced at the edges (CLI, HTTP)
#[derive(Error, Debug)]
pub enum BlockError {
    #[error("Unknown block: {0}")]
    UnknownBlock(String),

    #[error("Invalid block name: {0} (expected namespace/blockname)")]
    InvalidName(String),

    #[error("Block already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Invalid block attributes: {0}")]
    InvalidAttributes(String),
}

/// Rendered markup of one block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse attributes given as a JSON object string
pub fn parse_attributes(json: &str) -> Result<Attributes, BlockError> {
    if json.trim().is_empty() {
        return Ok(Attributes::new());
    }
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(BlockError::InvalidAttributes(format!(
            "expected an object, got {}",
            other
        ))),
        Err(e) => Err(BlockError::InvalidAttributes(e.to_string())),
    }
}
