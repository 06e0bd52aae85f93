//! ML Parser
//!
//! Builds an arena [`Document`] from HTML source. Tokenizing is done by
//! `html5gum`; this module owns tree construction: the open-element stack,
//! implied end tags, void elements and stray end tags.

use html5gum::{State, Token, Tokenizer};

use super::ast::{Document, Element, NodeId};
use super::html_tags::get_html_tag_definition;

/// Tree parsing error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeError {
    pub element_name: Option<String>,
    pub msg: String,
}

impl TreeError {
    pub fn create(element_name: Option<String>, msg: String) -> Self {
        TreeError { element_name, msg }
    }
}

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub document: Document,
    pub errors: Vec<TreeError>,
}

/// HTML parser
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        HtmlParser
    }

    /// Parse `source` into a document. Never fails: malformed markup is
    /// recovered from and reported in `errors`.
    pub fn parse(&self, source: &str) -> ParseTreeResult {
        let mut builder = TreeBuilder::new();
        builder.build(source);
        ParseTreeResult {
            document: builder.document,
            errors: builder.errors,
        }
    }
}

/// Internal tree builder
struct TreeBuilder {
    document: Document,
    container_stack: Vec<NodeId>,
    errors: Vec<TreeError>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            document: Document::new(),
            container_stack: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn build(&mut self, source: &str) {
        let mut tokenizer = Tokenizer::new(source);

        while let Some(token_result) = tokenizer.next() {
            let Ok(token) = token_result else {
                break;
            };

            match token {
                Token::StartTag(tag) => {
                    let name = String::from_utf8_lossy(&tag.name).to_ascii_lowercase();
                    let mut element = Element::new(name.clone());
                    for (key, value) in tag.attributes.iter() {
                        element.set_attr(
                            String::from_utf8_lossy(key).into_owned(),
                            String::from_utf8_lossy(value).into_owned(),
                        );
                    }

                    let is_container = self.consume_element_start_tag(element, tag.self_closing);

                    // Raw text and RCDATA elements need a tokenizer state switch
                    if is_container {
                        match name.as_str() {
                            "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                                tokenizer.set_state(State::ScriptData)
                            }
                            "textarea" | "title" => tokenizer.set_state(State::RcData),
                            _ => {}
                        }
                    }
                }
                Token::EndTag(tag) => {
                    let name = String::from_utf8_lossy(&tag.name).to_ascii_lowercase();
                    self.consume_element_end_tag(&name);
                }
                Token::String(text) => {
                    self.consume_text(&String::from_utf8_lossy(&text));
                }
                Token::Comment(comment) => {
                    let comment = self
                        .document
                        .create_comment(String::from_utf8_lossy(&comment).into_owned());
                    self.add_to_parent(comment);
                }
                Token::Doctype(doctype) => {
                    let name = String::from_utf8_lossy(&doctype.name).to_ascii_lowercase();
                    let doctype = self.document.create_doctype(name);
                    self.add_to_parent(doctype);
                }
                Token::Error(_) => {
                    // Tokenizer errors are recovered from by html5gum itself
                }
            }
        }

        // Elements still open at end of input are closed implicitly
        while let Some(open) = self.container_stack.pop() {
            self.report_implicitly_closed(open);
        }
    }

    fn get_container(&self) -> NodeId {
        self.container_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.document.root())
    }

    fn add_to_parent(&mut self, node: NodeId) {
        let parent = self.get_container();
        self.document.append_child(parent, node);
    }

    fn container_name(&self) -> Option<&str> {
        let open = *self.container_stack.last()?;
        self.document.element(open).map(|el| el.name.as_str())
    }

    /// Returns whether the element stays open to collect children.
    fn consume_element_start_tag(&mut self, element: Element, self_closing: bool) -> bool {
        let name = element.name.clone();
        let tag_def = get_html_tag_definition(&name);

        // Implied end tags: `<li>` closes an open `<li>`, `<tr>` an open `<td>` and `<tr>`, ...
        while let Some(parent_name) = self.container_name() {
            if !get_html_tag_definition(parent_name).is_closed_by_child(&name) {
                break;
            }
            self.container_stack.pop();
        }

        let node = self.document.create_element(element);
        self.add_to_parent(node);

        if self_closing || tag_def.is_void {
            return false;
        }
        self.container_stack.push(node);
        true
    }

    fn consume_element_end_tag(&mut self, name: &str) {
        if get_html_tag_definition(name).is_void {
            self.errors.push(TreeError::create(
                Some(name.to_string()),
                format!("Void elements do not have end tags \"{}\"", name),
            ));
            return;
        }

        let match_index = self.container_stack.iter().rposition(|open| {
            self.document
                .element(*open)
                .is_some_and(|el| el.name == name)
        });

        match match_index {
            Some(idx) => {
                // Pop elements from the top down to (and including) the matching element
                while self.container_stack.len() > idx + 1 {
                    if let Some(open) = self.container_stack.pop() {
                        self.report_implicitly_closed(open);
                    }
                }
                self.container_stack.pop();
            }
            None => {
                self.errors.push(TreeError::create(
                    Some(name.to_string()),
                    format!(
                        "Unexpected closing tag \"{}\". It may happen when the tag has already been closed by another tag.",
                        name
                    ),
                ));
            }
        }
    }

    fn report_implicitly_closed(&mut self, open: NodeId) {
        if let Some(el) = self.document.element(open) {
            let tag_def = get_html_tag_definition(&el.name);
            if !tag_def.is_void && !tag_def.closed_by_parent {
                let msg = format!("Unclosed element \"{}\"", el.name);
                self.errors
                    .push(TreeError::create(Some(el.name.clone()), msg));
            }
        }
    }

    fn consume_text(&mut self, text: &str) {
        let parent = self.get_container();
        let mut text = text;

        // The first newline directly after `<pre>`, `<textarea>` and `<listing>` is dropped
        if self.document.children(parent).is_empty() {
            if let Some(name) = self.container_name() {
                if get_html_tag_definition(name).ignore_first_lf {
                    text = text
                        .strip_prefix("\r\n")
                        .or_else(|| text.strip_prefix('\n'))
                        .unwrap_or(text);
                }
            }
        }

        self.document.append_text(parent, text);
    }
}
