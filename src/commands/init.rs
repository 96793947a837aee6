//! Initialize a new block library

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::{BlockLibrary, CONFIG_FILE};

const CONFIG_CONTENT: &str = r#"# Block library configuration

title: MWD Block Library
namespace: mwd

# URL
url: http://example.com
root: /

# Directory
content_dir: content
category_dir: category

# Query defaults
default_post_type: post
posts_per_page: 5
default_category: Uncategorized

# Editor options
excluded_post_types:
  - Media
  - Reusable Blocks
content_types:
  - name: post
    label: Posts
  - name: page
    label: Pages
  - name: attachment
    label: Media
  - name: wp_block
    label: Reusable Blocks
categories:
  - id: 1
    name: Uncategorized
  - id: 2
    name: News

server:
  ip: localhost
  port: 4000
"#;

/// Initialize a library in the given directory
pub fn init_library(target_dir: &Path) -> Result<()> {
    let content_dir = target_dir.join("content");
    fs::create_dir_all(&content_dir)?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::info!("Keeping existing {:?}", config_path);
    } else {
        fs::write(&config_path, CONFIG_CONTENT)?;
    }

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    let sample_post = format!(
        r#"---
title: Hello World
date: {}
categories:
  - News
---

Welcome to your block library. This post shows up in the **Posts** and
**Ajax Search** listings.
<!-- more -->

Everything after the marker only appears on the full post.
"#,
        now
    );

    let sample_page = format!(
        r#"---
title: About
date: {}
type: page
---

A page. Pick "Pages" in the search block to list it.
"#,
        now
    );

    fs::write(content_dir.join("hello-world.md"), sample_post)?;
    fs::write(content_dir.join("about.md"), sample_page)?;

    Ok(())
}

/// Run the init command with an existing library instance
pub fn run(library: &BlockLibrary) -> Result<()> {
    init_library(&library.base_dir)
}
