//! Shared JSON schema helpers for machine-consumable commands and APIs.

use dagskra_core::programs::{paginate, total_pages};
use dagskra_core::{DevlogMeta, DevlogPost, Neighbors};
use dagskra_types::Program;
use serde::Serialize;

pub const SCHEMA_VERSION: &str = "2025-01-dagskra-v1";

/// Standard envelope for machine-consumable responses.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub schema_version: &'static str,
    pub kind: &'static str,
    pub data: T,
}

pub fn envelope<T>(kind: &'static str, data: T) -> Envelope<T> {
    Envelope {
        schema_version: SCHEMA_VERSION,
        kind,
        data,
    }
}

/// A single devlog post with its rendered body and neighbours
#[derive(Serialize)]
pub struct DevlogData {
    pub post: DevlogPost,
    pub html: String,
    pub prev: Option<DevlogMeta>,
    pub next: Option<DevlogMeta>,
}

impl DevlogData {
    pub fn new(post: DevlogPost, neighbors: Neighbors) -> Self {
        let html = post.render_html();
        Self {
            post,
            html,
            prev: neighbors.prev,
            next: neighbors.next,
        }
    }
}

/// One page of a filtered program listing
#[derive(Serialize)]
pub struct ProgramPageData<'a> {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub items: &'a [&'a Program],
}

impl<'a> ProgramPageData<'a> {
    /// Slice page `page` out of an already filtered and sorted listing
    pub fn new(filtered: &'a [&'a Program], page: usize, page_size: usize) -> Self {
        Self {
            total: filtered.len(),
            page,
            page_size,
            total_pages: total_pages(filtered.len(), page_size),
            items: paginate(filtered, page, page_size),
        }
    }
}

#[derive(Serialize)]
pub struct TagsData {
    pub tags: Vec<String>,
}
