//! # dagskra-core
//!
//! Core library for dagskra, the program bank and devlog site.
//!
//! This crate provides the lite Markdown renderer used for devlog posts,
//! the devlog store, site configuration and the program listing pipeline
//! (filter, sort, paginate).

pub mod config;
pub mod devlogs;
pub mod frontmatter;
pub mod markdown;
pub mod models;
pub mod programs;

pub use config::Config;
pub use devlogs::{DevlogError, DevlogStore};
pub use markdown::{render_markdown, MarkdownProcessor};
pub use models::{DevlogFrontmatter, DevlogMeta, DevlogPage, DevlogPost, Neighbors};
pub use programs::{
    apply_filters, extract_tags, filter_by_query, filter_by_tags, load_programs, paginate,
    sort_programs, FilterState, Paginator, ProgramsError,
};
