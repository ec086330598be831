/// Visible text extraction over a PageNode tree
use serde::{Deserialize, Serialize};

use crate::page_node::{ElementNode, PageNode};
use crate::visibility::{is_rendered, is_visible};

const HEADING_MARKER: &str = "🔹";

/// How an element's text is emitted during extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCategory {
    /// h1-h4, strong, b: rendered text wrapped in heading markers
    Emphasis,
    /// li, p, span, td, th: rendered text on its own line
    TextBlock,
    /// table: one " | " joined line per row
    Table,
    /// anything else: walk the children
    Container,
}

impl TagCategory {
    pub fn of(tag: &str) -> TagCategory {
        match tag.to_ascii_lowercase().as_str() {
            "h1" | "h2" | "h3" | "h4" | "strong" | "b" => TagCategory::Emphasis,
            "li" | "p" | "span" | "td" | "th" => TagCategory::TextBlock,
            "table" => TagCategory::Table,
            _ => TagCategory::Container,
        }
    }
}

/// Output of one complete extraction pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "cleanedText")]
    pub text: String,
    #[serde(rename = "lastExtractedUrl")]
    pub source_url: String,
    /// ISO-8601 capture time
    #[serde(rename = "lastExtractedTime")]
    pub captured_at: String,
}

impl ExtractionResult {
    pub fn capture(root: &PageNode, source_url: &str, captured_at: &str) -> ExtractionResult {
        ExtractionResult {
            text: extract_text(root),
            source_url: source_url.to_string(),
            captured_at: captured_at.to_string(),
        }
    }
}

/// Extract the visible text below `node`.
///
/// Depth-first and pre-order. Text nodes contribute their trimmed content.
/// An invisible element prunes its whole subtree, even descendants that are
/// styled visible again. Emphasis, text block and table elements are
/// terminal: their children are not walked individually.
pub fn extract_text(node: &PageNode) -> String {
    let mut out = String::new();
    extract_into(node, &mut out);
    out
}

fn extract_into(node: &PageNode, out: &mut String) {
    let element = match node {
        PageNode::Text(content) => {
            out.push_str(content.trim());
            return;
        }
        PageNode::Element(element) if is_visible(&element.style) => element,
        _ => return,
    };

    match TagCategory::of(&element.tag) {
        TagCategory::Emphasis => {
            out.push_str("\n\n");
            out.push_str(HEADING_MARKER);
            out.push(' ');
            out.push_str(render_inner_text(element).trim());
            out.push(' ');
            out.push_str(HEADING_MARKER);
            out.push('\n');
        }
        TagCategory::TextBlock => {
            out.push_str(render_inner_text(element).trim());
            out.push('\n');
        }
        TagCategory::Table => extract_table(element, out),
        TagCategory::Container => {
            for child in &element.children {
                extract_into(child, out);
            }
        }
    }
}

/// Every `tr` below the table, nested tables included, becomes one line of
/// its `td`/`th` descendants joined with " | ". Row and cell visibility is
/// not consulted.
fn extract_table(table: &ElementNode, out: &mut String) {
    for row in table.descendants().into_iter().filter(|e| e.has_tag("tr")) {
        let cells: Vec<String> = row
            .descendants()
            .into_iter()
            .filter(|e| e.has_tag("td") || e.has_tag("th"))
            .map(|cell| render_inner_text(cell).trim().to_string())
            .collect();

        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
}

/// How an element shapes rendered inner text
enum Layout {
    LineBreak,
    Block,
    Cell,
    Inline,
}

impl Layout {
    fn of(element: &ElementNode) -> Layout {
        match element.tag_name().as_str() {
            "br" => Layout::LineBreak,
            "td" | "th" => Layout::Cell,
            "address" | "article" | "aside" | "blockquote" | "caption" | "dd" | "details"
            | "dialog" | "div" | "dl" | "dt" | "fieldset" | "figcaption" | "figure"
            | "footer" | "form" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header"
            | "hr" | "li" | "main" | "nav" | "ol" | "p" | "pre" | "section" | "summary"
            | "table" | "tr" | "ul" => Layout::Block,
            _ => Layout::Inline,
        }
    }
}

/// Approximation of the browser's rendered inner text for `element`.
///
/// There is no layout engine here, so the rules are:
/// - runs of ASCII whitespace inside text collapse to one space
/// - `br` breaks the line, block-level elements start and end a line
/// - table cells on a line are separated by a tab
/// - descendants that are not rendered (display none, visibility hidden)
///   are skipped
/// - every line is trimmed and blank lines are dropped
///
/// `pre` whitespace is not preserved. An element that is not rendered
/// itself yields its raw text content, as browsers do.
pub fn render_inner_text(element: &ElementNode) -> String {
    if !is_rendered(&element.style) {
        return element.text_content();
    }

    let mut raw = String::new();
    for child in &element.children {
        render_into(child, &mut raw);
    }
    normalize_lines(&raw)
}

fn render_into(node: &PageNode, raw: &mut String) {
    let element = match node {
        PageNode::Text(content) => {
            push_collapsed(content, raw);
            return;
        }
        PageNode::Element(element) if is_rendered(&element.style) => element,
        _ => return,
    };

    match Layout::of(element) {
        Layout::LineBreak => raw.push('\n'),
        Layout::Block => {
            raw.push('\n');
            for child in &element.children {
                render_into(child, raw);
            }
            raw.push('\n');
        }
        Layout::Cell => {
            for child in &element.children {
                render_into(child, raw);
            }
            raw.push('\t');
        }
        Layout::Inline => {
            for child in &element.children {
                render_into(child, raw);
            }
        }
    }
}

/// Source `\n` and `\t` become spaces so `normalize_lines` only splits on
/// the breaks and cell separators added for layout.
fn push_collapsed(content: &str, raw: &mut String) {
    let mut in_space = false;
    for c in content.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                raw.push(' ');
                in_space = true;
            }
        } else {
            raw.push(c);
            in_space = false;
        }
    }
}

fn normalize_lines(raw: &str) -> String {
    raw.split('\n')
        .map(|line| {
            line.split('\t')
                .map(|cell| cell.split_ascii_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|cell| !cell.is_empty())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
