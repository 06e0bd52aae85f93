//! Data scopes
//!
//! A render starts with the root data as its only scope. Entering an `each`
//! body layers a single binding (`item name -> current item`) over the
//! enclosing scope; the enclosing scope is never modified, so sibling
//! iterations cannot observe each other's bindings.

use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    kind: ScopeKind<'a>,
}

#[derive(Debug, Clone, Copy)]
enum ScopeKind<'a> {
    Root(&'a Value),
    Binding {
        name: &'a str,
        value: &'a Value,
        parent: &'a Scope<'a>,
    },
}

impl<'a> Scope<'a> {
    pub fn root(data: &'a Value) -> Self {
        Scope {
            kind: ScopeKind::Root(data),
        }
    }

    /// New scope where `name` resolves to `value`, shadowing any outer binding.
    pub fn bind(&'a self, name: &'a str, value: &'a Value) -> Scope<'a> {
        Scope {
            kind: ScopeKind::Binding {
                name,
                value,
                parent: self,
            },
        }
    }

    /// Look up a top-level name: innermost binding first, then the root data.
    pub fn lookup(&self, name: &str) -> Option<&'a Value> {
        let mut current = self;
        loop {
            match current.kind {
                ScopeKind::Binding {
                    name: bound,
                    value,
                    parent,
                } => {
                    if bound == name {
                        return Some(value);
                    }
                    current = parent;
                }
                ScopeKind::Root(data) => return data.as_object()?.get(name),
            }
        }
    }

    /// Number of bindings layered over the root.
    pub fn depth(&self) -> usize {
        match self.kind {
            ScopeKind::Root(_) => 0,
            ScopeKind::Binding { parent, .. } => parent.depth() + 1,
        }
    }
}
