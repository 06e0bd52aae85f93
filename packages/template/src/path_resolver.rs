//! Dotted data path resolution
//!
//! `user.address.city` walks the scope one segment at a time. A leading
//! `global.` resolves the remainder against the root data passed to the
//! render, whatever loop bindings are in effect.

use std::borrow::Cow;

use serde_json::Value;

use crate::scope::Scope;

pub const GLOBAL_PREFIX: &str = "global.";

const LENGTH: &str = "length";

/// Resolve `path` against `scope`, or against `global` for `global.`-prefixed
/// paths.
///
/// `None` means "undefined": a missing key, an out of range index or a
/// segment applied to a value that cannot be traversed. `null` is a value.
/// A trailing `length` on an array or string yields its length unless the
/// value is an object with its own `length` key.
pub fn resolve<'a>(path: &str, scope: &Scope<'a>, global: &'a Value) -> Option<Cow<'a, Value>> {
    let (mut current, rest) = match path.strip_prefix(GLOBAL_PREFIX) {
        Some(rest) => (global, rest),
        None => match path.split_once('.') {
            Some((first, rest)) => (scope.lookup(first)?, rest),
            None => return scope.lookup(path).map(Cow::Borrowed),
        },
    };

    let mut segments = rest.split('.').peekable();
    while let Some(segment) = segments.next() {
        match get_member(current, segment) {
            Some(next) => current = next,
            None if segment == LENGTH && segments.peek().is_none() => {
                return length_of(current).map(|len| Cow::Owned(Value::from(len)));
            }
            None => return None,
        }
    }
    Some(Cow::Borrowed(current))
}

/// Property access on a data value: object keys, array indices.
pub fn get_member<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// `length` of arrays and strings, in UTF-16 code units for strings.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::String(s) => Some(s.encode_utf16().count()),
        _ => None,
    }
}
