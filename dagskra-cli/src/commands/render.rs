//! Render command implementation.

use anyhow::{Context, Result};
use dagskra_core::frontmatter::parse_frontmatter;
use dagskra_core::render_markdown;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Render a Markdown file (or stdin for `-`) to HTML on stdout
pub fn render_file(input: &Path) -> Result<()> {
    let content = if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))?
    };

    let (_, body) = parse_frontmatter(&content);
    print!("{}", render_markdown(&body));
    Ok(())
}
