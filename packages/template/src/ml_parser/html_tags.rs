//! HTML Tag Definitions
//!
//! Parsing and serialization rules per tag name: void elements, implied end
//! tags, raw-text content.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Tag content types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagContentType {
    /// Serialized without escaping (`script`, `style`, ...)
    RawText,
    /// Tokenized as RCDATA but serialized with escaping (`textarea`, `title`)
    EscapableRawText,
    ParsableData,
}

/// HTML tag definition with specific parsing rules
#[derive(Debug, Clone)]
pub struct HtmlTagDefinition {
    pub closed_by_children: HashSet<String>,
    pub content_type: TagContentType,
    pub closed_by_parent: bool,
    pub is_void: bool,
    pub ignore_first_lf: bool,
}

impl HtmlTagDefinition {
    pub fn new() -> Self {
        HtmlTagDefinition {
            closed_by_children: HashSet::new(),
            content_type: TagContentType::ParsableData,
            closed_by_parent: false,
            is_void: false,
            ignore_first_lf: false,
        }
    }

    pub fn with_void(mut self, is_void: bool) -> Self {
        self.is_void = is_void;
        self.closed_by_parent = self.closed_by_parent || is_void;
        self
    }

    pub fn with_closed_by_children(mut self, children: &[&str]) -> Self {
        for child in children {
            self.closed_by_children.insert(child.to_lowercase());
        }
        self
    }

    pub fn with_closed_by_parent(mut self, closed_by_parent: bool) -> Self {
        self.closed_by_parent = closed_by_parent;
        self
    }

    pub fn with_content_type(mut self, content_type: TagContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_ignore_first_lf(mut self, ignore: bool) -> Self {
        self.ignore_first_lf = ignore;
        self
    }

    /// Whether opening `name` while this element is the innermost open one
    /// implies this element's end tag.
    pub fn is_closed_by_child(&self, name: &str) -> bool {
        self.is_void || self.closed_by_children.contains(&name.to_lowercase())
    }
}

impl Default for HtmlTagDefinition {
    fn default() -> Self {
        Self::new()
    }
}

/// Tag definitions registry
static TAG_DEFINITIONS: Lazy<HashMap<&'static str, HtmlTagDefinition>> = Lazy::new(|| {
    let mut defs = HashMap::new();

    for void in [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ] {
        defs.insert(void, HtmlTagDefinition::new().with_void(true));
    }

    // <p> tag - closed by many block elements
    defs.insert(
        "p",
        HtmlTagDefinition::new()
            .with_closed_by_children(&[
                "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer",
                "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "main",
                "nav", "ol", "p", "pre", "section", "table", "ul",
            ])
            .with_closed_by_parent(true),
    );

    // Table elements
    defs.insert(
        "thead",
        HtmlTagDefinition::new().with_closed_by_children(&["tbody", "tfoot"]),
    );
    defs.insert(
        "tbody",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["tbody", "tfoot"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "tfoot",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["tbody"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "tr",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["tr"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "td",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["td", "th", "tr"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "th",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["td", "th", "tr"])
            .with_closed_by_parent(true),
    );

    // List elements
    defs.insert(
        "li",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["li"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "dt",
        HtmlTagDefinition::new().with_closed_by_children(&["dt", "dd"]),
    );
    defs.insert(
        "dd",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["dt", "dd"])
            .with_closed_by_parent(true),
    );

    // Select elements
    defs.insert(
        "optgroup",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["optgroup"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "option",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["option", "optgroup"])
            .with_closed_by_parent(true),
    );

    // Elements that ignore first LF
    defs.insert("pre", HtmlTagDefinition::new().with_ignore_first_lf(true));
    defs.insert("listing", HtmlTagDefinition::new().with_ignore_first_lf(true));

    // Raw text content
    for raw in ["script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext"] {
        defs.insert(
            raw,
            HtmlTagDefinition::new().with_content_type(TagContentType::RawText),
        );
    }

    defs.insert(
        "title",
        HtmlTagDefinition::new().with_content_type(TagContentType::EscapableRawText),
    );
    defs.insert(
        "textarea",
        HtmlTagDefinition::new()
            .with_content_type(TagContentType::EscapableRawText)
            .with_ignore_first_lf(true),
    );

    defs
});

static DEFAULT_TAG_DEFINITION: Lazy<HtmlTagDefinition> = Lazy::new(HtmlTagDefinition::new);

/// Get the tag definition for a (case-insensitive) tag name
pub fn get_html_tag_definition(tag_name: &str) -> &'static HtmlTagDefinition {
    TAG_DEFINITIONS
        .get(tag_name.to_lowercase().as_str())
        .unwrap_or(&DEFAULT_TAG_DEFINITION)
}
