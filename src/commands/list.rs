//! List library content

use anyhow::Result;

use crate::store::ContentStore;
use crate::BlockLibrary;

/// List library content by type
pub fn run(library: &BlockLibrary, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" | "item" | "items" => {
            let store = library.load_store()?;
            println!("Items ({}):", store.items().len());
            for item in store.items() {
                println!(
                    "  {} - {} #{} [{}] {}",
                    item.date.format("%Y-%m-%d"),
                    item.title,
                    item.id,
                    item.post_type,
                    item.taxonomy_labels.join(", ")
                );
            }
        }
        "type" | "types" => {
            let store = library.load_store()?;
            let types = store.list_content_types()?;
            println!("Content types ({}):", types.len());
            for content_type in types {
                let hidden = if library
                    .config
                    .is_excluded_type(&content_type.name, &content_type.label)
                {
                    " (hidden in editor)"
                } else {
                    ""
                };
                println!("  {} - {}{}", content_type.name, content_type.label, hidden);
            }
        }
        "category" | "categories" => {
            let store = library.load_store()?;
            let categories = store.list_categories()?;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!(
                    "  #{} {} [{}] ({})",
                    category.id, category.name, category.slug, category.count
                );
            }
        }
        "block" | "blocks" => {
            let registry = library.register_blocks()?;
            println!("Blocks ({}):", registry.len());
            for block in registry.iter() {
                let mode = if block.is_dynamic() { "dynamic" } else { "static" };
                let attributes: Vec<&str> = block.attributes.keys().map(String::as_str).collect();
                println!(
                    "  {} - {} [{}] attributes: {}",
                    block.name,
                    block.title,
                    mode,
                    attributes.join(", ")
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, type, category, block",
                content_type
            );
        }
    }

    Ok(())
}
