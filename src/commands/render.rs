//! Render one block instance

use anyhow::Result;

use crate::blocks::{self, RenderContext};
use crate::BlockLibrary;

/// Render `block` with attributes given as a JSON object
pub fn render_block(library: &BlockLibrary, block: &str, attributes: &str) -> Result<String> {
    let attributes = blocks::parse_attributes(attributes)?;
    let block = qualify(library, block);

    let store = library.load_store()?;
    let registry = library.register_blocks()?;
    let context = RenderContext {
        config: &library.config,
        store: &store,
    };

    let fragment = registry.render(&block, &attributes, &context)?;
    tracing::debug!("Rendered {} ({} bytes)", block, fragment.as_str().len());
    Ok(fragment.into_string())
}

/// Print a rendered block to stdout
pub fn run(library: &BlockLibrary, block: &str, attributes: &str) -> Result<()> {
    println!("{}", render_block(library, block, attributes)?);
    Ok(())
}

/// Accept bare block names (`posts`) as well as `namespace/posts`
fn qualify(library: &BlockLibrary, block: &str) -> String {
    if block.contains('/') {
        block.to_string()
    } else {
        library.config.block_name(block)
    }
}
