//! Block registry
//!
//! Every block registers a `namespace/blockname` name, an attribute schema
//! and how it renders: a static save function whose markup is stored with
//! the content, or a dynamic callback invoked on every page render.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::card::{CardAttributes, INHERIT_FONT_SIZE};
use super::query::{ListQuery, POSTS_PER_PAGE, SELECTED_CATEGORY, SELECTED_TYPE};
use super::render::{FragmentStyle, ListingRenderer};
use super::{Attributes, BlockError, Fragment};
use crate::config::LibraryConfig;
use crate::store::ContentStore;

/// What a dynamic block renders against
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a LibraryConfig,
    pub store: &'a dyn ContentStore,
}

/// Save function of a static block
pub type SaveFn = Arc<dyn Fn(&Attributes) -> Fragment + Send + Sync>;

/// Render callback of a dynamic block
pub type RenderCallback = Arc<dyn Fn(&Attributes, &RenderContext<'_>) -> Fragment + Send + Sync>;

/// How a block produces its markup
#[derive(Clone)]
pub enum BlockRender {
    /// Markup produced at save time and stored with the content
    Static(SaveFn),
    /// Markup produced on every render
    Dynamic(RenderCallback),
}

impl fmt::Debug for BlockRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockRender::Static(_) => f.write_str("Static"),
            BlockRender::Dynamic(_) => f.write_str("Dynamic"),
        }
    }
}

fn serialize_render<S: Serializer>(render: &BlockRender, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(match render {
        BlockRender::Static(_) => "static",
        BlockRender::Dynamic(_) => "dynamic",
    })
}

/// Attribute value types known to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

/// Schema of one block attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSchema {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Where the editor reads the value back from saved markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl AttributeSchema {
    pub fn of(kind: AttributeType) -> Self {
        Self {
            kind,
            default: None,
            source: None,
            selector: None,
            attribute: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Value sourced from saved markup (`text`, `children`, ...)
    pub fn sourced(mut self, source: &str, selector: &str) -> Self {
        self.source = Some(source.to_string());
        self.selector = Some(selector.to_string());
        self
    }

    /// Value sourced from an HTML attribute of saved markup
    pub fn from_html_attribute(mut self, attribute: &str, selector: &str) -> Self {
        self.source = Some("attribute".to_string());
        self.attribute = Some(attribute.to_string());
        self.selector = Some(selector.to_string());
        self
    }
}

/// Definition of a single block
#[derive(Debug, Clone, Serialize)]
pub struct BlockDefinition {
    /// `namespace/blockname`
    pub name: String,
    pub title: String,
    pub icon: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub attributes: IndexMap<String, AttributeSchema>,
    #[serde(serialize_with = "serialize_render")]
    pub render: BlockRender,
}

impl BlockDefinition {
    pub fn new(name: &str, title: &str, render: BlockRender) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            icon: "block-default".to_string(),
            category: "common".to_string(),
            keywords: Vec::new(),
            attributes: IndexMap::new(),
            render,
        }
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn attribute(mut self, key: &str, schema: AttributeSchema) -> Self {
        self.attributes.insert(key.to_string(), schema);
        self
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.render, BlockRender::Dynamic(_))
    }

    /// Stored attributes with schema defaults filled in
    pub fn with_defaults(&self, attributes: &Attributes) -> Attributes {
        let mut merged = attributes.clone();
        for (key, schema) in &self.attributes {
            if let Some(default) = &schema.default {
                merged.entry(key.clone()).or_insert_with(|| default.clone());
            }
        }
        merged
    }
}

/// Registry of block definitions, in registration order
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    blocks: IndexMap<String, BlockDefinition>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block; names must be `namespace/blockname` and unique
    pub fn register(&mut self, definition: BlockDefinition) -> Result<(), BlockError> {
        if !is_valid_block_name(&definition.name) {
            return Err(BlockError::InvalidName(definition.name));
        }
        if self.blocks.contains_key(&definition.name) {
            return Err(BlockError::AlreadyRegistered(definition.name));
        }
        tracing::debug!(
            "Registered block {} ({:?})",
            definition.name,
            definition.render
        );
        self.blocks.insert(definition.name.clone(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&BlockDefinition> {
        self.blocks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.blocks.values()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render a block instance from its stored attributes
    pub fn render(
        &self,
        name: &str,
        attributes: &Attributes,
        context: &RenderContext<'_>,
    ) -> Result<Fragment, BlockError> {
        let block = self
            .get(name)
            .ok_or_else(|| BlockError::UnknownBlock(name.to_string()))?;
        let attributes = block.with_defaults(attributes);

        Ok(match &block.render {
            BlockRender::Static(save) => save(&attributes),
            BlockRender::Dynamic(callback) => callback(&attributes, context),
        })
    }
}

/// `namespace/blockname`, lowercase alphanumerics and dashes on both sides
fn is_valid_block_name(name: &str) -> bool {
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    };
    match name.split_once('/') {
        Some((namespace, block)) => valid_part(namespace) && valid_part(block),
        None => false,
    }
}

fn listing_callback(style: FragmentStyle) -> RenderCallback {
    Arc::new(move |attributes: &Attributes, context: &RenderContext<'_>| {
        let query = ListQuery::from_attributes(attributes);
        ListingRenderer::new(context.config).render(&query, context.store, style)
    })
}

/// Register this library's blocks. Run once at startup.
pub fn register_library_blocks(config: &LibraryConfig) -> Result<BlockRegistry, BlockError> {
    let namespace = config.namespace.as_str();
    let mut registry = BlockRegistry::new();

    registry.register(
        BlockDefinition::new(
            &config.block_name("posts"),
            "Posts",
            BlockRender::Dynamic(listing_callback(FragmentStyle::Plain)),
        )
        .icon("admin-post")
        .keywords(&["posts", "posts block", namespace])
        .attribute("categories", AttributeSchema::of(AttributeType::Array))
        .attribute(SELECTED_CATEGORY, AttributeSchema::of(AttributeType::String))
        .attribute(POSTS_PER_PAGE, AttributeSchema::of(AttributeType::String)),
    )?;

    registry.register(
        BlockDefinition::new(
            &config.block_name("ajax-search"),
            "Ajax Search",
            BlockRender::Dynamic(listing_callback(FragmentStyle::Card)),
        )
        .icon("search")
        .keywords(&["search", "search block", "ajax search", namespace])
        .attribute("postTypes", AttributeSchema::of(AttributeType::Array))
        .attribute(
            SELECTED_TYPE,
            AttributeSchema::of(AttributeType::String).with_default("All"),
        ),
    )?;

    registry.register(
        BlockDefinition::new(
            &config.block_name("card"),
            "Card",
            BlockRender::Static(Arc::new(|attributes: &Attributes| {
                CardAttributes::from_attributes(attributes).save()
            })),
        )
        .icon("shield")
        .keywords(&["card", "card block", namespace])
        .attribute(
            "title",
            AttributeSchema::of(AttributeType::String).sourced("text", ".card__title"),
        )
        .attribute(
            "body",
            AttributeSchema::of(AttributeType::Array).sourced("children", ".card__body"),
        )
        .attribute(
            "imageAlt",
            AttributeSchema::of(AttributeType::String).from_html_attribute("alt", ".card__image"),
        )
        .attribute(
            "imageUrl",
            AttributeSchema::of(AttributeType::String).from_html_attribute("src", ".card__image"),
        )
        .attribute("fontSize", AttributeSchema::of(AttributeType::Number))
        .attribute(
            "titleFontSize",
            AttributeSchema::of(AttributeType::String).with_default(INHERIT_FONT_SIZE),
        ),
    )?;

    tracing::info!("Registered {} blocks under {}/", registry.len(), namespace);
    Ok(registry)
}
