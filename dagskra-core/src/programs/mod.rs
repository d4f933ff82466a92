//! Program bank listing pipeline: filtering, sorting and pagination.
//!
//! Every stage borrows its input and returns a new vector of references, so
//! the loaded snapshot is never reordered or modified.

pub mod collation;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod state;

pub use collation::compare_icelandic;
pub use filter::{extract_tags, filter_by_query, filter_by_tags};
pub use paginate::{paginate, total_pages, Paginator, DEFAULT_PAGE_SIZE};
pub use sort::{parse_timestamp_millis, sort_programs};
pub use state::{apply_filters, FilterState, LikeState};

use dagskra_types::{Program, ProgramsResponse};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgramsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid program snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a program snapshot, either a bare array or `{"programs": [...]}`
pub fn parse_programs(json: &str) -> Result<Vec<Program>, ProgramsError> {
    let response: ProgramsResponse = serde_json::from_str(json)?;
    Ok(response.into_programs())
}

/// Load a program snapshot from a JSON file
pub fn load_programs(path: &Path) -> Result<Vec<Program>, ProgramsError> {
    let content = fs::read_to_string(path)?;
    let programs = parse_programs(&content)?;
    tracing::debug!("Loaded {} programs from {:?}", programs.len(), path);
    Ok(programs)
}
