//! Program listing commands.

use crate::agent;
use anyhow::{bail, Context, Result};
use dagskra_core::programs::{apply_filters, extract_tags, load_programs};
use dagskra_core::Config;
use dagskra_types::{Program, SortBy};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProgramOptions {
    pub query: String,
    pub tags: Vec<String>,
    pub sort_by: SortBy,
    pub page: usize,
    pub page_size: Option<usize>,
    pub json: bool,
}

/// Resolve the snapshot path from the argument or the config
fn snapshot_path(config: &Config, file: Option<&Path>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path.to_path_buf()),
        None => config
            .programs_path()
            .context("No program snapshot given and paths.programs is not set"),
    }
}

fn load(config_path: &Path, file: Option<&Path>) -> Result<(Config, Vec<Program>)> {
    let config = Config::load_or_default(config_path).context("Failed to load configuration")?;
    let path = snapshot_path(&config, file)?;
    let programs =
        load_programs(&path).with_context(|| format!("Failed to load programs from {:?}", path))?;
    Ok((config, programs))
}

/// Run the listing pipeline over a snapshot and print one page
pub fn list_programs(config_path: &Path, file: Option<&Path>, opts: ProgramOptions) -> Result<()> {
    let (config, programs) = load(config_path, file)?;
    let page_size = opts.page_size.unwrap_or(config.programs.page_size);
    if page_size == 0 {
        bail!("--page-size must be at least 1");
    }

    let filtered = apply_filters(&programs, &opts.tags, &opts.query, opts.sort_by);
    let data = agent::ProgramPageData::new(&filtered, opts.page, page_size);

    if opts.json {
        let payload = agent::envelope("programs.page", data);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if data.total == 0 {
        println!("No programs match");
        return Ok(());
    }

    println!(
        "Page {} of {} ({} programs, sorted by {})\n",
        data.page,
        data.total_pages,
        data.total,
        opts.sort_by.as_str()
    );
    for program in data.items {
        print_program(program);
    }

    Ok(())
}

fn print_program(program: &Program) {
    let tags = if program.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", program.tags.join(", "))
    };
    println!("{}  ♥ {}{}", program.name, program.like_count, tags);
    if !program.workspace.name.is_empty() {
        println!("  {}", program.workspace.name);
    }
}

/// Print the unique tags of a snapshot in first-seen order
pub fn list_tags(config_path: &Path, file: Option<&Path>, json: bool) -> Result<()> {
    let (_, programs) = load(config_path, file)?;
    let tags = extract_tags(&programs);

    if json {
        let payload = agent::envelope("programs.tags", agent::TagsData { tags });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        for tag in tags {
            println!("{tag}");
        }
    }

    Ok(())
}
