//! Directive attributes
//!
//! Names of the four directive attributes, the per-element summary of which
//! ones are present, and the `each` directive grammar.

use bitflags::bitflags;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::RenderOptions;
use crate::ml_parser::ast::Element;

bitflags! {
    /// Directives present on one element
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DirectiveFlags: u8 {
        const VALUE = 1 << 0;
        const IF = 1 << 1;
        const IF_NOT = 1 << 2;
        const EACH = 1 << 3;

        const CONDITIONAL = Self::IF.bits() | Self::IF_NOT.bits();
    }
}

/// Resolved attribute names for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveNames {
    pub value: String,
    pub if_: String,
    pub if_not: String,
    pub each: String,
    pub hidden_class: String,
}

impl DirectiveNames {
    pub fn new(prefix: &str, hidden_class: &str) -> Self {
        DirectiveNames {
            value: format!("{}value", prefix),
            if_: format!("{}if", prefix),
            if_not: format!("{}if-not", prefix),
            each: format!("{}each", prefix),
            hidden_class: hidden_class.to_string(),
        }
    }

    pub fn from_options(options: &RenderOptions) -> Self {
        Self::new(&options.attribute_prefix, &options.hidden_class)
    }

    /// All four attribute names, in the order the finalizer strips them.
    pub fn all(&self) -> [&str; 4] {
        [&self.value, &self.if_, &self.if_not, &self.each]
    }

    pub fn flags(&self, element: &Element) -> DirectiveFlags {
        let mut flags = DirectiveFlags::empty();
        if element.has_attr(&self.value) {
            flags |= DirectiveFlags::VALUE;
        }
        if element.has_attr(&self.if_) {
            flags |= DirectiveFlags::IF;
        }
        if element.has_attr(&self.if_not) {
            flags |= DirectiveFlags::IF_NOT;
        }
        if element.has_attr(&self.each) {
            flags |= DirectiveFlags::EACH;
        }
        flags
    }
}

impl Default for DirectiveNames {
    fn default() -> Self {
        Self::from_options(&RenderOptions::default())
    }
}

// `<item> in <path>`: exactly one ` in ` separator, no whitespace inside either side
static EACH_EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z_$][A-Za-z0-9_$]*) in (\S+)\s*$").expect("valid each regex")
});

/// Parsed `each` directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EachDirective<'a> {
    pub item_name: &'a str,
    pub array_path: &'a str,
}

/// Parse an `each` value. Returns `None` for anything malformed, which the
/// repetition pass treats as a no-op.
pub fn parse_each(value: &str) -> Option<EachDirective<'_>> {
    let captures = EACH_EXPRESSION.captures(value)?;
    let item_name = captures.get(1)?.as_str();
    let array_path = captures.get(2)?.as_str();
    Some(EachDirective {
        item_name,
        array_path,
    })
}
