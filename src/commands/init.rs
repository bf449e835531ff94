//! Initialize a new board directory

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Postboard configuration

title: Postboard

# Directory
posts_dir: posts
public_dir: public

# Writing
new_post_name: ":title.md"

# Categories, numbered from 1 in this order
categories:
  - Általános
  - Kérdések

markdown:
  # escape: author HTML is shown as text; sanitize: kept and filtered
  raw_html: escape
  breaks: false
  tables: true
  strikethrough: true
  highlight: false

summary:
  locale: hu
  extra_chars: ""
"#;

const WELCOME_POST: &str = r#"---
id: 1
title: Üdvözlünk!
author: Postboard
categories: Általános
---
# Üdvözlünk!

Ez az első bejegyzés. A tartalom **markdown** formátumú.

- Bejegyzés készítése: `postboard new "Cím"`
- Előnézet szerkesztés közben: `postboard render posts/cim.md --watch`
"#;

/// Initialize a new board in the given directory
pub fn init_board(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;
    write_if_missing(&target_dir.join("posts").join("udvozlunk.md"), WELCOME_POST)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
    } else {
        fs::write(path, content)?;
        tracing::debug!("Created {:?}", path);
    }
    Ok(())
}
