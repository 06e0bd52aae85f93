//! Directive processor
//!
//! Three depth-first passes over the tree, in this order: conditionals
//! (`if` / `if-not`), values (`value`), repetition (`each`). Every pass visits
//! elements without directives too, so directives at any depth are reached.

use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, trace};

use crate::directives::{parse_each, DirectiveNames};
use crate::display::to_text;
use crate::expression_parser::evaluate_condition;
use crate::ml_parser::ast::{Document, NodeId};
use crate::path_resolver;
use crate::scope::Scope;

/// Applies the directive passes to a parsed document.
pub struct DirectiveProcessor<'a> {
    names: &'a DirectiveNames,
    global: &'a Value,
}

impl<'a> DirectiveProcessor<'a> {
    /// `global` is the root data, also reachable through `global.` paths.
    pub fn new(names: &'a DirectiveNames, global: &'a Value) -> Self {
        DirectiveProcessor { names, global }
    }

    /// Run all three passes from the document root.
    pub fn process(&self, document: &mut Document) {
        let root = document.root();
        let scope = Scope::root(self.global);
        self.process_conditionals(document, root, &scope);
        self.process_values(document, root, &scope);
        self.process_each(document, root, &scope);
    }

    /// Conditional pass. A false `if` (or a true `if-not`) adds the hidden
    /// marker, the opposite outcome removes it. With both attributes present,
    /// `if-not` is applied last and decides.
    pub fn process_conditionals(&self, document: &mut Document, id: NodeId, scope: &Scope<'_>) {
        if let Some(element) = document.element(id) {
            let if_expression = element.attr(&self.names.if_).map(str::to_owned);
            let if_not_expression = element.attr(&self.names.if_not).map(str::to_owned);

            if let Some(expression) = if_expression {
                let show = evaluate_condition(&expression, scope, self.global);
                self.set_hidden(document, id, !show);
            }
            if let Some(expression) = if_not_expression {
                let show = !evaluate_condition(&expression, scope, self.global);
                self.set_hidden(document, id, !show);
            }
        }

        for child in document.element_children(id) {
            self.process_conditionals(document, child, scope);
        }
    }

    fn set_hidden(&self, document: &mut Document, id: NodeId, hidden: bool) {
        if let Some(element) = document.element_mut(id) {
            trace!(element = %element.name, hidden, "conditional");
            if hidden {
                element.add_class(&self.names.hidden_class);
            } else if element.has_class(&self.names.hidden_class) {
                element.remove_class(&self.names.hidden_class);
                // No empty `class=""` left behind once the marker goes
                if element.attr("class") == Some("") {
                    element.remove_attr("class");
                }
            }
        }
    }

    /// Value pass. A resolved path replaces the element's content with the
    /// value's text; an unresolved one leaves the content alone.
    pub fn process_values(&self, document: &mut Document, id: NodeId, scope: &Scope<'_>) {
        let path = document
            .element(id)
            .and_then(|element| element.attr(&self.names.value))
            .map(str::to_owned);

        if let Some(path) = path {
            match path_resolver::resolve(&path, scope, self.global) {
                Some(value) => document.set_text_content(id, &to_text(&value)),
                None => trace!(path = %path, "value path unresolved"),
            }
        }

        for child in document.element_children(id) {
            self.process_values(document, child, scope);
        }
    }

    /// Repetition pass. An element whose `each` names an array is replaced by
    /// one processed clone per item; anything else is left in place and its
    /// children are visited.
    pub fn process_each(&self, document: &mut Document, id: NodeId, scope: &Scope<'_>) {
        let directive = document
            .element(id)
            .and_then(|element| element.attr(&self.names.each))
            .map(str::to_owned);

        if let Some(directive) = directive {
            match parse_each(&directive) {
                Some(each) => match path_resolver::resolve(each.array_path, scope, self.global) {
                    Some(Cow::Borrowed(Value::Array(items))) => {
                        self.expand(document, id, each.item_name, items, scope);
                        return;
                    }
                    _ => debug!(directive = %directive, "each path is not an array, skipping"),
                },
                None => debug!(directive = %directive, "malformed each directive, skipping"),
            }
        }

        for child in document.element_children(id) {
            self.process_each(document, child, scope);
        }
    }

    /// Insert one clone of `template_id` per item before it, then remove it.
    ///
    /// The template is copied before anything is inserted so every clone
    /// starts from the same markup. Nested repetitions are expanded inside
    /// each clone's children with the item bound; the clone itself is never
    /// re-expanded.
    fn expand(
        &self,
        document: &mut Document,
        template_id: NodeId,
        item_name: &str,
        items: &[Value],
        scope: &Scope<'_>,
    ) {
        let parent = document.parent(template_id);
        let template = document.deep_clone(template_id);
        debug!(item_name, count = items.len(), "expanding each");

        for item in items {
            let clone = document.deep_clone(template);
            let item_scope = scope.bind(item_name, item);

            self.process_conditionals(document, clone, &item_scope);
            self.process_values(document, clone, &item_scope);
            for child in document.element_children(clone) {
                self.process_each(document, child, &item_scope);
            }

            if let Some(parent) = parent {
                document.insert_before(parent, clone, template_id);
            }
        }

        document.detach(template_id);
    }
}
