//! ML Parser AST
//!
//! Arena-backed HTML tree. Nodes live in one `Vec` owned by the [`Document`]
//! and refer to each other through [`NodeId`] handles; the parent handle is
//! only used for traversal and splicing.

use indexmap::IndexMap;
use smallvec::SmallVec;

/// Handle to a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node type union
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Doctype(String),
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Element node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: IndexMap<String, String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: IndexMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.shift_remove(name)
    }

    /// Tokens of the `class` attribute, in order, without duplicates.
    pub fn class_list(&self) -> SmallVec<[&str; 4]> {
        let mut tokens: SmallVec<[&str; 4]> = SmallVec::new();
        if let Some(class) = self.attrs.get("class") {
            for token in class.split_ascii_whitespace() {
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
        }
        tokens
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.class_list().contains(&token)
    }

    pub fn add_class(&mut self, token: &str) {
        let mut tokens: SmallVec<[String; 4]> =
            self.class_list().iter().map(|t| t.to_string()).collect();
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
        self.attrs.insert("class".to_string(), tokens.join(" "));
    }

    /// Removing from an element without a `class` attribute leaves it without one.
    pub fn remove_class(&mut self, token: &str) {
        if !self.has_attr("class") {
            return;
        }
        let tokens: SmallVec<[String; 4]> = self
            .class_list()
            .iter()
            .filter(|t| **t != token)
            .map(|t| t.to_string())
            .collect();
        self.attrs.insert("class".to_string(), tokens.join(" "));
    }
}

/// An HTML document: the arena plus the handle of its root node.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document {
            nodes: vec![Node::new(NodeKind::Document)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes[id.0].as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Snapshot of the element children of `id`. Callers that splice the tree
    /// while iterating rely on this being a copy.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push(NodeKind::Element(element))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(text.into()))
    }

    pub fn create_doctype(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::Doctype(name.into()))
    }

    /// Unlink `id` from its parent. The subtree stays intact and can be
    /// re-inserted.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` into `parent` right before `reference`, or at the end if
    /// `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == reference);
        self.nodes[child.0].parent = Some(parent);
        match position {
            Some(index) => self.nodes[parent.0].children.insert(index, child),
            None => self.nodes[parent.0].children.push(child),
        }
    }

    /// Copy the subtree rooted at `id` into fresh, detached nodes.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let kind = self.nodes[id.0].kind.clone();
        let copy = self.push(kind);
        let children = self.nodes[id.0].children.clone();
        for child in children {
            let child_copy = self.deep_clone(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[copy.0].children.push(child_copy);
        }
        copy
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) | NodeKind::Document => {
                for child in &self.nodes[id.0].children {
                    self.collect_text(*child, out);
                }
            }
            NodeKind::Comment(_) | NodeKind::Doctype(_) => {}
        }
    }

    /// Replace every child of `id` with a single text node. The empty string
    /// leaves no child at all.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node);
        }
    }

    /// Append text to `parent`, merging with a trailing text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.nodes[parent.0].children.last().copied() {
            if let NodeKind::Text(existing) = &mut self.nodes[last.0].kind {
                existing.push_str(text);
                return;
            }
        }
        let text_node = self.create_text(text);
        self.append_child(parent, text_node);
    }

    /// Pre-order list of the elements reachable from `id`, `id` included if it
    /// is an element.
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.element(current).is_some() {
                out.push(current);
            }
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Elements named `name` reachable from the root, in document order.
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        self.descendant_elements(self.root)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(|el| el.name == name))
            .collect()
    }
}
