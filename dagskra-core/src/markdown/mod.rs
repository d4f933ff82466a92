//! Lite Markdown to HTML rendering for devlog posts.
//!
//! Supports a small subset: headings, paragraphs, fenced code,
//! blockquotes, nested lists, horizontal rules and bold/italic/code/link
//! inline markup. Rendering is a single line-oriented pass without an AST;
//! anything unrecognised is treated as paragraph text, so the renderer
//! never fails.

pub mod inline;

pub use inline::{escape_html, render_inline, sanitize_url};

use regex::Regex;
use std::sync::OnceLock;

static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
static BLOCKQUOTE_REGEX: OnceLock<Regex> = OnceLock::new();
static LIST_ITEM_REGEX: OnceLock<Regex> = OnceLock::new();
static RULE_REGEX: OnceLock<Regex> = OnceLock::new();

fn heading_regex() -> &'static Regex {
    HEADING_REGEX.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap())
}

fn blockquote_regex() -> &'static Regex {
    BLOCKQUOTE_REGEX.get_or_init(|| Regex::new(r"^>\s?(.*)$").unwrap())
}

fn list_item_regex() -> &'static Regex {
    LIST_ITEM_REGEX.get_or_init(|| Regex::new(r"^(\s*)([-*+]|\d+\.)\s+(.*)$").unwrap())
}

fn rule_regex() -> &'static Regex {
    RULE_REGEX.get_or_init(|| {
        Regex::new(r"^(?:(?:\*[ \t]*){3,}|(?:-[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap()
    })
}

const FENCE: &str = "```";

/// Kind of an open list element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn from_marker(marker: &str) -> Self {
        if marker.ends_with('.') {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        }
    }

    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// One level of the open list stack
#[derive(Debug, Clone, Copy)]
struct ListFrame {
    kind: ListKind,
    /// Nesting depth in 2-space units
    indent: usize,
}

/// Lite Markdown processor
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownProcessor;

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Convert markdown to HTML
    pub fn convert(&self, markdown: &str) -> String {
        let normalized = markdown.replace("\r\n", "\n").replace('\r', "\n");
        let mut state = RenderState::default();

        for raw in normalized.split('\n') {
            state.push_line(raw);
        }

        state.finish()
    }
}

/// Render a Markdown body to HTML.
///
/// # Example
///
/// ```
/// use dagskra_core::markdown::render_markdown;
///
/// let html = render_markdown("# Fundur\n\nMætum **kl. 18**.");
/// assert_eq!(html, "<h1>Fundur</h1>\n<p>Mætum <strong>kl. 18</strong>.</p>\n");
/// ```
pub fn render_markdown(markdown: &str) -> String {
    MarkdownProcessor::new().convert(markdown)
}

/// Per-call rendering state
#[derive(Default)]
struct RenderState {
    html: String,
    in_code: bool,
    code_lines: Vec<String>,
    paragraph: Vec<String>,
    lists: Vec<ListFrame>,
}

impl RenderState {
    fn push_line(&mut self, raw: &str) {
        let line = raw.replace('\t', "    ");

        if line.starts_with(FENCE) {
            if self.in_code {
                self.emit_code();
            } else {
                self.flush_paragraph();
                self.close_lists_to(0);
                self.in_code = true;
                self.code_lines.clear();
            }
            return;
        }

        if self.in_code {
            self.code_lines.push(raw.to_string());
            return;
        }

        if line.trim().is_empty() {
            self.flush_paragraph();
            self.close_lists_to(0);
            return;
        }

        if rule_regex().is_match(&line) {
            self.flush_paragraph();
            self.close_lists_to(0);
            self.html.push_str("<hr/>\n");
            return;
        }

        if let Some(caps) = heading_regex().captures(&line) {
            self.flush_paragraph();
            self.close_lists_to(0);
            let level = caps[1].len();
            self.html.push_str(&format!(
                "<h{level}>{}</h{level}>\n",
                render_inline(caps[2].trim())
            ));
            return;
        }

        if let Some(caps) = blockquote_regex().captures(&line) {
            self.flush_paragraph();
            self.close_lists_to(0);
            self.html.push_str(&format!(
                "<blockquote><p>{}</p></blockquote>\n",
                render_inline(&caps[1])
            ));
            return;
        }

        if let Some(caps) = list_item_regex().captures(&line) {
            self.flush_paragraph();
            let indent = caps[1].chars().count() / 2;
            let kind = ListKind::from_marker(&caps[2]);
            self.push_list_item(kind, indent, &render_inline(&caps[3]));
            return;
        }

        self.paragraph.push(line.trim().to_string());
    }

    fn push_list_item(&mut self, kind: ListKind, indent: usize, content: &str) {
        let Some(top) = self.lists.last().copied() else {
            self.open_list(kind, indent, content);
            return;
        };

        if indent > top.indent {
            // Nested list inside the current item
            self.html.push('\n');
            self.open_list(kind, indent, content);
            return;
        }

        while self.lists.last().is_some_and(|frame| indent < frame.indent) {
            self.close_top_list();
        }

        match self.lists.last().copied() {
            None => self.open_list(kind, indent, content),
            Some(frame) if frame.kind != kind => {
                self.close_top_list();
                self.open_list(kind, indent, content);
            }
            Some(_) => {
                self.html.push_str("</li>\n<li>");
                self.html.push_str(content);
            }
        }
    }

    fn open_list(&mut self, kind: ListKind, indent: usize, content: &str) {
        self.html.push_str(&format!("<{}>\n<li>{}", kind.tag(), content));
        self.lists.push(ListFrame { kind, indent });
    }

    fn close_top_list(&mut self) {
        if let Some(frame) = self.lists.pop() {
            self.html.push_str(&format!("</li>\n</{}>\n", frame.kind.tag()));
        }
    }

    fn close_lists_to(&mut self, depth: usize) {
        while self.lists.len() > depth {
            self.close_top_list();
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        let text = text.trim();
        if !text.is_empty() {
            self.html
                .push_str(&format!("<p>{}</p>\n", render_inline(text)));
        }
        self.paragraph.clear();
    }

    fn emit_code(&mut self) {
        let code = self.code_lines.join("\n");
        self.html
            .push_str(&format!("<pre><code>{}</code></pre>\n", escape_html(&code)));
        self.code_lines.clear();
        self.in_code = false;
    }

    fn finish(mut self) -> String {
        if self.in_code {
            self.emit_code();
        }
        self.flush_paragraph();
        self.close_lists_to(0);
        self.html
    }
}
