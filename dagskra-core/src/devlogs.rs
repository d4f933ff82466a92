//! Devlog discovery and lookup.

use crate::frontmatter::parse_frontmatter;
use crate::models::{DevlogMeta, DevlogPage, DevlogPost, Neighbors};
use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File name reserved for the post template
const TEMPLATE_FILE: &str = "template.md";

#[derive(Error, Debug)]
pub enum DevlogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to walk devlog directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Devlog posts stored as Markdown files in a single directory
#[derive(Debug, Clone)]
pub struct DevlogStore {
    dir: PathBuf,
}

impl DevlogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All posts, newest first.
    ///
    /// Posts whose dates cannot be parsed keep their relative order.
    pub fn list(&self) -> Result<Vec<DevlogMeta>, DevlogError> {
        if !self.dir.is_dir() {
            tracing::debug!("Devlog directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        for path in self.discover_files()? {
            let Some(slug) = slug_of(&path) else {
                continue;
            };
            let content = read_post(&path)?;
            let (frontmatter, _) = parse_frontmatter(&content);

            match DevlogMeta::from_frontmatter(&slug, &frontmatter) {
                Some(meta) => posts.push(meta),
                None => tracing::debug!("Skipping {:?}: missing title or date", path),
            }
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// A window of the listing starting at `offset`
    pub fn paginate(&self, offset: usize, limit: usize) -> Result<DevlogPage, DevlogError> {
        let posts = self.list()?;
        let total = posts.len();
        let items = posts.into_iter().skip(offset).take(limit).collect();
        Ok(DevlogPage { total, items })
    }

    /// The newer and older posts around `slug`
    pub fn neighbors(&self, slug: &str) -> Result<Neighbors, DevlogError> {
        let posts = self.list()?;
        let Some(index) = posts.iter().position(|p| p.slug == slug) else {
            return Ok(Neighbors::default());
        };

        Ok(Neighbors {
            prev: index.checked_sub(1).map(|i| posts[i].clone()),
            next: posts.get(index + 1).cloned(),
        })
    }

    /// Load a full post by slug.
    ///
    /// Returns `Ok(None)` for unknown slugs, slugs that try to leave the
    /// devlog directory and posts without a title or date.
    pub fn load(&self, slug: &str) -> Result<Option<DevlogPost>, DevlogError> {
        if !is_valid_slug(slug) {
            tracing::debug!("Rejected devlog slug {:?}", slug);
            return Ok(None);
        }

        let path = self.dir.join(format!("{slug}.md"));
        if !path.is_file() {
            return Ok(None);
        }

        let content = read_post(&path)?;
        let (frontmatter, body) = parse_frontmatter(&content);

        Ok(DevlogMeta::from_frontmatter(slug, &frontmatter).map(|meta| DevlogPost {
            meta,
            body_markdown: body,
        }))
    }

    fn discover_files(&self) -> Result<Vec<PathBuf>, DevlogError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("md")
            {
                continue;
            }
            let is_template = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.eq_ignore_ascii_case(TEMPLATE_FILE));
            if is_template {
                continue;
            }
            files.push(path.to_path_buf());
        }
        Ok(files)
    }
}

/// Read a post, replacing invalid UTF-8 sequences
fn read_post(path: &Path) -> Result<String, DevlogError> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8(bytes).unwrap_or_else(|e| {
        tracing::warn!("{:?} is not valid UTF-8, decoding lossily", path);
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    }))
}

fn slug_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\']) && !slug.contains("..")
}

/// Stable newest-first sort. Posts with unparseable dates go last and keep
/// their relative order.
fn sort_newest_first(posts: &mut [DevlogMeta]) {
    posts.sort_by_key(|p| match p.timestamp_millis() {
        Some(ms) => (0, Reverse(ms)),
        None => (1, Reverse(0)),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, title: &str, date: &str) {
        let content = format!("---\ntitle: {title}\ndate: \"{date}\"\n---\nBody of {title}\n");
        fs::write(dir.join(name), content).unwrap();
    }

    fn store_with_posts() -> (TempDir, DevlogStore) {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "v1.md", "Fyrsta", "2025-01-01");
        write_post(dir.path(), "v3.md", "Þriðja", "2025-03-01");
        write_post(dir.path(), "v2.md", "Önnur", "2025-02-01");
        let store = DevlogStore::new(dir.path());
        (dir, store)
    }

    fn slugs(posts: &[DevlogMeta]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_list_newest_first() {
        let (_dir, store) = store_with_posts();
        let posts = store.list().unwrap();
        assert_eq!(slugs(&posts), vec!["v3", "v2", "v1"]);
    }

    #[test]
    fn test_list_skips_template_and_incomplete_posts() {
        let (dir, store) = store_with_posts();
        write_post(dir.path(), "Template.md", "Sniðmát", "2030-01-01");
        fs::write(dir.path().join("draft.md"), "---\ntitle: Drög\n---\nNo date\n").unwrap();
        fs::write(dir.path().join("broken.md"), "---\ntitle: [unclosed\n---\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not markdown").unwrap();

        let posts = store.list().unwrap();
        assert_eq!(slugs(&posts), vec!["v3", "v2", "v1"]);
    }

    #[test]
    fn test_invalid_utf8_post_is_decoded_lossily() {
        let (dir, store) = store_with_posts();
        let mut bytes = b"---\ntitle: Gamalt\ndate: 2024-12-01\n---\nLatin-1 ".to_vec();
        bytes.extend_from_slice(&[0xe6, 0xff]);
        bytes.push(b'\n');
        fs::write(dir.path().join("old.md"), bytes).unwrap();

        let posts = store.list().unwrap();
        assert_eq!(slugs(&posts), vec!["v3", "v2", "v1", "old"]);

        let post = store.load("old").unwrap().unwrap();
        assert_eq!(post.meta.title, "Gamalt");
        assert!(post.body_markdown.contains('\u{FFFD}'));
    }

    #[test]
    fn test_titles_with_colons_and_hashes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("d3.md"),
            "---\ntitle: Devlog #3: Síur\ndate: 2025-03-01\nsummary: Lagað: síur virka\n---\nBody\n",
        )
        .unwrap();
        write_post(dir.path(), "d2.md", "Devlog 2", "2025-02-01");
        let store = DevlogStore::new(dir.path());

        let posts = store.list().unwrap();
        assert_eq!(slugs(&posts), vec!["d3", "d2"]);
        assert_eq!(posts[0].title, "Devlog #3: Síur");
        assert_eq!(posts[0].summary.as_deref(), Some("Lagað: síur virka"));

        let post = store.load("d3").unwrap().unwrap();
        assert_eq!(post.meta.title, "Devlog #3: Síur");
        assert_eq!(post.body_markdown, "Body\n");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = DevlogStore::new(dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.paginate(0, 10).unwrap().total, 0);
    }

    #[test]
    fn test_unparseable_dates_keep_relative_order() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a.md", "A", "einhvern tíma");
        write_post(dir.path(), "b.md", "B", "bráðum");
        write_post(dir.path(), "c.md", "C", "2025-01-01");
        let store = DevlogStore::new(dir.path());
        assert_eq!(slugs(&store.list().unwrap()), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_paginate() {
        let (_dir, store) = store_with_posts();
        let page = store.paginate(1, 1).unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(slugs(&page.items), vec!["v2"]);

        let past_end = store.paginate(5, 10).unwrap();
        assert_eq!(past_end.total, 3);
        assert!(past_end.items.is_empty());
    }

    #[test]
    fn test_neighbors() {
        let (_dir, store) = store_with_posts();

        let middle = store.neighbors("v2").unwrap();
        assert_eq!(middle.prev.map(|p| p.slug), Some("v3".to_string()));
        assert_eq!(middle.next.map(|p| p.slug), Some("v1".to_string()));

        let newest = store.neighbors("v3").unwrap();
        assert!(newest.prev.is_none());
        assert_eq!(newest.next.map(|p| p.slug), Some("v2".to_string()));

        assert_eq!(store.neighbors("unknown").unwrap(), Neighbors::default());
    }

    #[test]
    fn test_load_post() {
        let (_dir, store) = store_with_posts();
        let post = store.load("v2").unwrap().unwrap();
        assert_eq!(post.meta.title, "Önnur");
        assert_eq!(post.body_markdown, "Body of Önnur\n");
        assert_eq!(post.render_html(), "<p>Body of Önnur</p>\n");

        assert!(store.load("missing").unwrap().is_none());
    }

    #[test]
    fn test_load_rejects_path_traversal() {
        let (dir, _store) = store_with_posts();
        let nested = dir.path().join("devlogs");
        fs::create_dir(&nested).unwrap();
        let store = DevlogStore::new(&nested);

        assert!(store.load("../v1").unwrap().is_none());
        assert!(store.load("..").unwrap().is_none());
        assert!(store.load("a/b").unwrap().is_none());
        assert!(store.load("").unwrap().is_none());
    }
}
