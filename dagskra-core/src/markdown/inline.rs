//! Inline formatting: code spans, links, bold and italic.

use regex::{Captures, Regex};
use std::sync::OnceLock;

static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
static BOLD_REGEX: OnceLock<Regex> = OnceLock::new();
static ITALIC_REGEX: OnceLock<Regex> = OnceLock::new();
static SAFE_SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();

fn link_regex() -> &'static Regex {
    LINK_REGEX.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap())
}

fn bold_regex() -> &'static Regex {
    BOLD_REGEX.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap())
}

fn italic_regex() -> &'static Regex {
    ITALIC_REGEX.get_or_init(|| Regex::new(r"(^|[^*])\*([^*]+)\*").unwrap())
}

fn safe_scheme_regex() -> &'static Regex {
    SAFE_SCHEME_REGEX.get_or_init(|| Regex::new(r"(?i)^(https?:|mailto:)").unwrap())
}

/// Escape the characters that matter inside HTML text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Keep `http:`, `https:` and `mailto:` URLs; everything else becomes `#`.
///
/// ```
/// use dagskra_core::markdown::sanitize_url;
///
/// assert_eq!(sanitize_url(" https://example.com "), "https://example.com");
/// assert_eq!(sanitize_url("javascript:alert(1)"), "#");
/// ```
pub fn sanitize_url(url: &str) -> &str {
    let trimmed = url.trim();
    if safe_scheme_regex().is_match(trimmed) {
        trimmed
    } else {
        "#"
    }
}

/// Render inline markup for a single block of text.
///
/// Code spans are cut out first and only escaped; the remaining text is
/// escaped and then gets links, bold and italic applied in that order.
pub fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;

    while let Some(span) = find_code_span(rest) {
        out.push_str(&format_text(&rest[..span.start]));
        out.push_str("<code>");
        out.push_str(&escape_html(&rest[span.content_start..span.content_end]));
        out.push_str("</code>");
        rest = &rest[span.end..];
    }

    out.push_str(&format_text(rest));
    out
}

/// Byte offsets of a backtick-delimited span within a string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CodeSpan {
    start: usize,
    content_start: usize,
    content_end: usize,
    end: usize,
}

/// Locate the first code span. The opening run of N backticks is closed by
/// the next occurrence of the same N backticks; when none exists the run is
/// shortened one backtick at a time.
fn find_code_span(text: &str) -> Option<CodeSpan> {
    let start = text.find('`')?;
    let run = text[start..].bytes().take_while(|&b| b == b'`').count();

    for len in (1..=run).rev() {
        let delimiter = &text[start..start + len];
        let content_start = start + len;
        if let Some(offset) = text[content_start..].find(delimiter) {
            let content_end = content_start + offset;
            return Some(CodeSpan {
                start,
                content_start,
                content_end,
                end: content_end + len,
            });
        }
    }

    None
}

fn format_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let escaped = escape_html(text);

    // Label and URL are already escaped at this point
    let linked = link_regex().replace_all(&escaped, |caps: &Captures| {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            sanitize_url(&caps[2]),
            &caps[1]
        )
    });

    let bold = bold_regex().replace_all(&linked, "<strong>$1</strong>");
    let italic = italic_regex().replace_all(&bold, "${1}<em>${2}</em>");

    italic.into_owned()
}
