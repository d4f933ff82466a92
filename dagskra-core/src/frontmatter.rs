//! Frontmatter parsing from markdown files.

use crate::models::DevlogFrontmatter;
use regex::Regex;
use std::sync::OnceLock;

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)^---[ \t]*\n(?:(.*?)\n)?---[ \t]*(?:\n(.*))?$").unwrap()
    })
}

/// Split content into the raw YAML header and the Markdown body.
///
/// Returns `None` for the header when the content does not start with a
/// `---` delimited block.
pub fn split_frontmatter(content: &str) -> (Option<String>, String) {
    let normalized = content.replace("\r\n", "\n");

    match frontmatter_regex().captures(&normalized) {
        Some(captures) => {
            let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or("");
            let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");
            (Some(yaml.to_string()), body.to_string())
        }
        None => (None, normalized),
    }
}

/// Parse frontmatter from markdown content
///
/// Returns a tuple of (frontmatter, markdown_body).
/// If no frontmatter is present, returns default frontmatter with the full content as body.
///
/// Headers made only of flat `key: value` lines are read line by line,
/// splitting at the first `:` and keeping the rest verbatim, so titles may
/// contain `:` or ` #`. Anything more structured goes through serde_yaml,
/// falling back to the line reader when it is not valid YAML.
///
/// # Example
///
/// ```
/// use dagskra_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: Devlog #3: Síur\ndate: 2025-01-01\n---\n# Nýtt\n";
///
/// let (fm, body) = parse_frontmatter(content);
/// assert_eq!(fm.title.as_deref(), Some("Devlog #3: Síur"));
/// assert_eq!(fm.date.as_deref(), Some("2025-01-01"));
/// assert!(body.trim().starts_with("# Nýtt"));
/// ```
pub fn parse_frontmatter(content: &str) -> (DevlogFrontmatter, String) {
    let (header, body) = split_frontmatter(content);

    let frontmatter = match header {
        Some(header) if !header.trim().is_empty() => parse_header(&header),
        _ => DevlogFrontmatter::default(),
    };

    (frontmatter, body)
}

fn parse_header(header: &str) -> DevlogFrontmatter {
    if is_flat_header(header) {
        return parse_header_lines(header);
    }

    match serde_yaml::from_str(header) {
        Ok(frontmatter) => frontmatter,
        Err(e) => {
            tracing::debug!("Front matter is not valid YAML, reading it line by line: {}", e);
            parse_header_lines(header)
        }
    }
}

/// True when every entry is a single unindented `key: value` line
fn is_flat_header(header: &str) -> bool {
    header
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .all(|line| {
            !line.starts_with(char::is_whitespace) && !line.starts_with("- ") && line.contains(':')
        })
}

#[derive(Debug, Clone, PartialEq)]
enum HeaderValue {
    Text(String),
    List(Vec<String>),
}

impl HeaderValue {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Some(inner) if inner.trim().is_empty() => HeaderValue::List(Vec::new()),
            Some(inner) => HeaderValue::List(
                inner
                    .split(',')
                    .map(|item| strip_quotes(item.trim()).to_string())
                    .collect(),
            ),
            None => HeaderValue::Text(strip_quotes(raw).to_string()),
        }
    }

    fn into_text(self) -> String {
        match self {
            HeaderValue::Text(text) => text,
            HeaderValue::List(items) => items.join(","),
        }
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Line reader for `key: value` headers. Later keys win; lines without a
/// `:` and `#` comment lines are ignored.
fn parse_header_lines(header: &str) -> DevlogFrontmatter {
    let mut frontmatter = DevlogFrontmatter::default();

    for line in header.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, raw)) = line.split_once(':') else {
            continue;
        };
        let value = HeaderValue::parse(raw.trim());

        match key.trim() {
            "title" => frontmatter.title = Some(value.into_text()),
            "date" => frontmatter.date = Some(value.into_text()),
            "author" => frontmatter.author = Some(value.into_text()),
            "summary" => frontmatter.summary = Some(value.into_text()),
            "tags" => {
                frontmatter.tags = match value {
                    HeaderValue::List(tags) => Some(tags),
                    HeaderValue::Text(_) => None,
                }
            }
            _ => {}
        }
    }

    frontmatter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_frontmatter() {
        let content = r#"---
title: Test Post
date: 2025-01-01
author: Sigga
summary: Fyrsta færslan
---

# Hello World

This is the content."#;

        let (fm, body) = parse_frontmatter(content);
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.date.as_deref(), Some("2025-01-01"));
        assert_eq!(fm.author.as_deref(), Some("Sigga"));
        assert_eq!(fm.summary.as_deref(), Some("Fyrsta færslan"));
        assert!(body.contains("# Hello World"));
        assert!(body.contains("This is the content."));
    }

    #[test]
    fn test_parse_frontmatter_with_flow_tags() {
        let content = "---\ntitle: Tagged\ndate: 2025-02-02\ntags: [\"ui\", release]\n---\nBody";

        let (fm, body) = parse_frontmatter(content);
        assert_eq!(fm.tags, Some(vec!["ui".to_string(), "release".to_string()]));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_no_frontmatter() {
        let content = "# Just Content\n\nNo frontmatter here.";
        let (fm, body) = parse_frontmatter(content);
        assert_eq!(fm, DevlogFrontmatter::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_crlf_frontmatter() {
        let content = "---\r\ntitle: Windows\r\ndate: 2025-01-01\r\n---\r\nLine\r\n";
        let (fm, body) = parse_frontmatter(content);
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(body, "Line\n");
    }

    #[test]
    fn test_frontmatter_without_body() {
        let (fm, body) = parse_frontmatter("---\ntitle: Only\n---");
        assert_eq!(fm.title.as_deref(), Some("Only"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let (fm, body) = parse_frontmatter("---\n---\nBody");
        assert_eq!(fm, DevlogFrontmatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unclosed_flow_value_is_kept_verbatim() {
        let content = r#"---
title: Test
invalid yaml: [unclosed
---

Content."#;

        let (fm, body) = parse_frontmatter(content);
        assert_eq!(fm.title.as_deref(), Some("Test"));
        assert_eq!(fm.tags, None);
        assert!(body.contains("Content."));
    }

    #[test]
    fn test_colon_inside_value() {
        let content = "---\ntitle: Síur\ndate: 2025-03-01\nsummary: Lagað: síur virka\n---\nBody";
        let (fm, _) = parse_frontmatter(content);
        assert_eq!(fm.summary.as_deref(), Some("Lagað: síur virka"));
        assert_eq!(fm.title.as_deref(), Some("Síur"));
    }

    #[test]
    fn test_hash_inside_title() {
        let content = "---\ntitle: Devlog #3: Síur\ndate: \"2025-03-01\"\n# comment line\n---\n";
        let (fm, _) = parse_frontmatter(content);
        assert_eq!(fm.title.as_deref(), Some("Devlog #3: Síur"));
        assert_eq!(fm.date.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_quotes_and_lists_in_line_header() {
        let content = "---\ntitle: 'Útgáfa'\nauthor: \"Sigga\"\ntags: ['a', \"b\", c]\n---\n";
        let (fm, _) = parse_frontmatter(content);
        assert_eq!(fm.title.as_deref(), Some("Útgáfa"));
        assert_eq!(fm.author.as_deref(), Some("Sigga"));
        assert_eq!(
            fm.tags,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );

        let (fm, _) = parse_frontmatter("---\ntitle: T\ntags: []\n---\n");
        assert_eq!(fm.tags, Some(Vec::new()));

        let (fm, _) = parse_frontmatter("---\ntitle: T\ntags: stakt\n---\n");
        assert_eq!(fm.tags, None);
    }

    #[test]
    fn test_block_yaml_header() {
        let content = "---\ntitle: Listi\ndate: 2025-01-01\ntags:\n  - a\n  - b\n---\nBody";
        let (fm, body) = parse_frontmatter(content);
        assert_eq!(fm.title.as_deref(), Some("Listi"));
        assert_eq!(fm.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_invalid_block_yaml_falls_back_to_lines() {
        let content = "---\ntitle: Ný síða: útgáfa\ndate: 2025-01-01\ntags:\n  - a\n---\n";
        let (fm, _) = parse_frontmatter(content);
        assert_eq!(fm.title.as_deref(), Some("Ný síða: útgáfa"));
        assert_eq!(fm.date.as_deref(), Some("2025-01-01"));
        assert_eq!(fm.tags, None);
    }
}
