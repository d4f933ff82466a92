//! Devlog listing and lookup commands.

use crate::{agent, DevlogFormat};
use anyhow::{Context, Result};
use dagskra_core::{Config, DevlogStore};
use std::path::Path;

fn open_store(config_path: &Path) -> Result<DevlogStore> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    Ok(DevlogStore::new(config.devlogs_dir()))
}

/// Print a window of the devlog listing
pub fn list_devlogs(config_path: &Path, offset: usize, limit: usize, json: bool) -> Result<()> {
    let store = open_store(config_path)?;
    let page = store
        .paginate(offset, limit)
        .with_context(|| format!("Failed to read devlogs from {:?}", store.dir()))?;

    if json {
        let payload = agent::envelope("devlog.list", page);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No devlogs found in {:?}", store.dir());
        return Ok(());
    }

    for meta in &page.items {
        println!("{}  {}  {}", meta.display_date(), meta.slug, meta.title);
        if let Some(summary) = &meta.summary {
            println!("    {}", summary);
        }
    }

    let shown = offset + page.items.len();
    if page.total > shown {
        println!("\n  ... and {} more", page.total - shown);
    }

    Ok(())
}

/// Print a single devlog post in the requested format
pub fn show_devlog(config_path: &Path, slug: &str, format: DevlogFormat) -> Result<()> {
    let store = open_store(config_path)?;
    let post = store
        .load(slug)
        .with_context(|| format!("Failed to read devlog '{}'", slug))?
        .with_context(|| format!("Devlog '{}' not found", slug))?;

    match format {
        DevlogFormat::Html => print!("{}", post.render_html()),
        DevlogFormat::Json => {
            let neighbors = store.neighbors(slug)?;
            let payload = agent::envelope("devlog.full", agent::DevlogData::new(post, neighbors));
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        DevlogFormat::Markdown => {
            let fm = serde_yaml::to_string(&post.meta)?;
            print!("---\n{}---\n{}", fm, post.body_markdown);
        }
    }

    Ok(())
}
