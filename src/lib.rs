//! mwd-blocks: post listing and card blocks for block-based editors
//!
//! This crate renders the dynamic post listing blocks (`posts`,
//! `ajax-search`) against a content store and produces the static markup
//! of the `card` block. A filesystem-backed in-memory store, a CLI and a
//! small HTTP surface mirroring the editor's REST contract are included.

pub mod blocks;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod store;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Configuration file name inside the library directory
pub const CONFIG_FILE: &str = "_blocks.yml";

/// The block library application
#[derive(Debug, Clone)]
pub struct BlockLibrary {
    /// Library configuration
    pub config: config::LibraryConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
}

impl BlockLibrary {
    /// Create a new library instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::LibraryConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::LibraryConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Load the content directory into a store
    pub fn load_store(&self) -> Result<store::MemoryStore> {
        Ok(store::MemoryStore::load(&self.config, &self.content_dir)?)
    }

    /// Register the library's blocks
    pub fn register_blocks(&self) -> Result<blocks::BlockRegistry> {
        Ok(blocks::register_library_blocks(&self.config)?)
    }

    /// Scaffold a new library in the base directory
    pub fn init(&self) -> Result<()> {
        commands::init::init_library(&self.base_dir)
    }
}
