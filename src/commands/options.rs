//! Load editor picker options

use anyhow::Result;

use crate::blocks::{ListQueryBuilder, OptionKind};
use crate::BlockLibrary;

/// Load and print the options a picker of `kind` would show
pub async fn run(library: &BlockLibrary, kind: &str) -> Result<()> {
    let kind: OptionKind = kind.parse().map_err(anyhow::Error::msg)?;
    let store = library.load_store()?;

    let builder = match kind {
        OptionKind::Categories => ListQueryBuilder::for_categories(),
        OptionKind::PostTypes => {
            ListQueryBuilder::for_post_types(&library.config.excluded_post_types)
        }
    };

    if let Some(status) = builder.status_text() {
        println!("{}", status);
    }

    let loaded = builder.load_options(&store).await.map(|options| options.to_vec());
    if let Some(status) = builder.status_text() {
        println!("{}", status);
    }

    for option in loaded? {
        println!("  {} - {}", option.value, option.label);
    }

    Ok(())
}
