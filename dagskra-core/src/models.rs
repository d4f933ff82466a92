//! Content model structs for devlog posts.

use crate::markdown::render_markdown;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Frontmatter metadata from devlog markdown files
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DevlogFrontmatter {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub summary: Option<String>,
}

/// Listing metadata for a single devlog post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DevlogMeta {
    /// File name without the `.md` extension
    pub slug: String,

    pub title: String,

    /// ISO timestamp or `YYYY-MM-DD`
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl DevlogMeta {
    /// Build listing metadata from parsed frontmatter.
    ///
    /// Returns `None` when the title or date is missing or blank.
    pub fn from_frontmatter(slug: &str, frontmatter: &DevlogFrontmatter) -> Option<Self> {
        let title = frontmatter.title.as_deref().map(str::trim).unwrap_or("");
        let date = frontmatter.date.as_deref().map(str::trim).unwrap_or("");
        if title.is_empty() || date.is_empty() {
            return None;
        }

        Some(Self {
            slug: slug.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            author: frontmatter.author.clone(),
            tags: frontmatter.tags.clone(),
            summary: frontmatter.summary.clone(),
        })
    }

    /// Publication time in milliseconds since the epoch, if the date parses
    pub fn timestamp_millis(&self) -> Option<i64> {
        crate::programs::parse_timestamp_millis(&self.date)
    }

    /// Date formatted as `YYYY-MM-DD`, or the raw value when it cannot be parsed
    pub fn display_date(&self) -> String {
        let raw = self.date.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return dt.format("%Y-%m-%d").to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format("%Y-%m-%d").to_string();
        }
        raw.to_string()
    }
}

/// A full devlog post including its Markdown body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DevlogPost {
    #[serde(flatten)]
    pub meta: DevlogMeta,

    /// Markdown body with the frontmatter stripped
    pub body_markdown: String,
}

impl DevlogPost {
    /// Render the body with the lite Markdown renderer
    pub fn render_html(&self) -> String {
        render_markdown(&self.body_markdown)
    }
}

/// A window of the devlog listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DevlogPage {
    pub total: usize,
    pub items: Vec<DevlogMeta>,
}

/// Adjacent posts in newest-to-oldest order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Neighbors {
    /// Newer post
    pub prev: Option<DevlogMeta>,

    /// Older post
    pub next: Option<DevlogMeta>,
}
