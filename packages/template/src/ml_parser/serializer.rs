//! HTML Serializer
//!
//! Serializes an arena [`Document`] back to an HTML string following the
//! HTML fragment serialization rules.

use super::ast::{Document, NodeId, NodeKind};
use super::html_tags::{get_html_tag_definition, TagContentType};
use crate::chars;

pub struct SerializerVisitor<'a> {
    document: &'a Document,
}

impl<'a> SerializerVisitor<'a> {
    pub fn new(document: &'a Document) -> Self {
        SerializerVisitor { document }
    }

    pub fn visit(&self, id: NodeId, out: &mut String) {
        match self.document.kind(id) {
            NodeKind::Document => self.visit_all(id, out),
            NodeKind::Doctype(name) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(name);
                out.push('>');
            }
            NodeKind::Element(_) => self.visit_element(id, out),
            NodeKind::Text(text) => self.visit_text(id, text, out),
            NodeKind::Comment(value) => {
                out.push_str("<!--");
                out.push_str(value);
                out.push_str("-->");
            }
        }
    }

    fn visit_element(&self, id: NodeId, out: &mut String) {
        let Some(element) = self.document.element(id) else {
            return;
        };

        out.push('<');
        out.push_str(&element.name);
        for (name, value) in &element.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        out.push('>');

        let tag_def = get_html_tag_definition(&element.name);
        if tag_def.is_void {
            return;
        }

        // Re-add the newline the parser drops after `<pre>` / `<textarea>`
        if tag_def.ignore_first_lf {
            if let Some(NodeKind::Text(text)) = self
                .document
                .children(id)
                .first()
                .map(|first| self.document.kind(*first))
            {
                if text.starts_with(chars::LF) {
                    out.push(chars::LF);
                }
            }
        }

        self.visit_all(id, out);

        out.push_str("</");
        out.push_str(&element.name);
        out.push('>');
    }

    fn visit_text(&self, id: NodeId, text: &str, out: &mut String) {
        let raw_parent = self
            .document
            .parent(id)
            .and_then(|parent| self.document.element(parent))
            .is_some_and(|parent| {
                get_html_tag_definition(&parent.name).content_type == TagContentType::RawText
            });

        if raw_parent {
            out.push_str(text);
        } else {
            out.push_str(&escape_text(text));
        }
    }

    fn visit_all(&self, id: NodeId, out: &mut String) {
        for child in self.document.children(id) {
            self.visit(*child, out);
        }
    }
}

/// Serialize the whole document
pub fn serialize(document: &Document) -> String {
    serialize_node(document, document.root())
}

/// Serialize one node including its own tags (outer HTML)
pub fn serialize_node(document: &Document, id: NodeId) -> String {
    let mut out = String::new();
    SerializerVisitor::new(document).visit(id, &mut out);
    out
}

pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            chars::AMPERSAND => escaped.push_str("&amp;"),
            chars::LT => escaped.push_str("&lt;"),
            chars::GT => escaped.push_str("&gt;"),
            chars::NBSP => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            chars::AMPERSAND => escaped.push_str("&amp;"),
            chars::DQ => escaped.push_str("&quot;"),
            chars::NBSP => escaped.push_str("&nbsp;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
