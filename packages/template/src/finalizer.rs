//! Post-processing after the directive passes

use tracing::trace;

use crate::directives::{DirectiveFlags, DirectiveNames};
use crate::ml_parser::ast::Document;

/// Remove hidden elements and, with `remove_js_attributes`, strip directive
/// attributes from everything that stays. Returns the number of elements
/// removed.
///
/// With `remove_js_attributes` every element carrying a directive is
/// considered; without it only elements carrying `if` or `if-not`, and their
/// attributes and marker class are kept.
pub fn finalize(document: &mut Document, names: &DirectiveNames, remove_js_attributes: bool) -> usize {
    let candidates = if remove_js_attributes {
        DirectiveFlags::all()
    } else {
        DirectiveFlags::CONDITIONAL
    };

    let mut removed = 0;
    for id in document.descendant_elements(document.root()) {
        let Some(element) = document.element(id) else {
            continue;
        };
        if !names.flags(element).intersects(candidates) {
            continue;
        }

        if element.has_class(&names.hidden_class) {
            trace!(element = %element.name, "removing hidden element");
            document.detach(id);
            removed += 1;
            continue;
        }

        if remove_js_attributes {
            if let Some(element) = document.element_mut(id) {
                for name in names.all() {
                    element.remove_attr(name);
                }
            }
        }
    }
    removed
}
