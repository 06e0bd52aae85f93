#![allow(dead_code)]

/**
 * Test Utilities
 *
 * Shared helpers for the parser and render integration tests
 */
use attr_template::ml_parser::ast::{Document, NodeId, NodeKind};
use attr_template::{render_with_options, RenderOptions};
use serde_json::Value;

/// Flatten a document into `[kind, content, depth]` rows in document order.
pub fn humanize_dom(document: &Document) -> Vec<(String, String, usize)> {
    let mut rows = Vec::new();
    for child in document.children(document.root()) {
        humanize_node(document, *child, 0, &mut rows);
    }
    rows
}

fn humanize_node(
    document: &Document,
    id: NodeId,
    depth: usize,
    rows: &mut Vec<(String, String, usize)>,
) {
    let (kind, content) = match document.kind(id) {
        NodeKind::Document => ("document", String::new()),
        NodeKind::Doctype(name) => ("doctype", name.clone()),
        NodeKind::Element(el) => ("element", el.name.clone()),
        NodeKind::Text(text) => ("text", text.clone()),
        NodeKind::Comment(text) => ("comment", text.clone()),
    };
    rows.push((kind.to_string(), content, depth));
    for child in document.children(id) {
        humanize_node(document, *child, depth + 1, rows);
    }
}

pub fn row(kind: &str, content: &str, depth: usize) -> (String, String, usize) {
    (kind.to_string(), content.to_string(), depth)
}

/// Drop whitespace-only runs between tags so indented templates compare
/// against compact expectations.
pub fn squash(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut pending = String::new();
    let mut after_tag = true;
    for ch in html.chars() {
        if ch.is_whitespace() && after_tag {
            pending.push(ch);
            continue;
        }
        if ch != '<' {
            out.push_str(&pending);
        }
        pending.clear();
        after_tag = ch == '>';
        out.push(ch);
    }
    out.trim_end().to_string()
}

pub fn render_keep(html: &str, data: &Value) -> String {
    squash(&render_with_options(html, data, &RenderOptions::default()))
}

pub fn render_strip(html: &str, data: &Value) -> String {
    let options = RenderOptions::new().with_remove_js_attributes(true);
    squash(&render_with_options(html, data, &options))
}
