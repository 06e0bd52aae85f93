//! ML (Markup Language) Parser Module
//!
//! HTML parsing into an arena tree and serialization back to a string

pub mod ast;
pub mod html_tags;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use html_tags::{get_html_tag_definition, HtmlTagDefinition, TagContentType};
pub use parser::{HtmlParser, ParseTreeResult, TreeError};
pub use serializer::{serialize, serialize_node};
