//! Render configuration

use serde::{Deserialize, Serialize};

/// Class token used to flag elements whose conditional evaluated to "hide".
pub const DEFAULT_HIDDEN_CLASS: &str = "remove-it";

/// Options for a render.
///
/// Deserializes from camelCase JSON so a config file can be shared with the
/// Node binding, e.g. `{"removeJsAttributes": true, "attributePrefix": "js-"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Strip directive attributes and delete hidden elements. When false, only
    /// hidden conditional elements are deleted and every attribute stays.
    pub remove_js_attributes: bool,
    /// Prepended to every directive name (`js-` gives `js-if`, `js-each`, ...).
    pub attribute_prefix: String,
    /// Hidden marker class token.
    pub hidden_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            remove_js_attributes: false,
            attribute_prefix: String::new(),
            hidden_class: DEFAULT_HIDDEN_CLASS.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remove_js_attributes(mut self, remove: bool) -> Self {
        self.remove_js_attributes = remove;
        self
    }

    pub fn with_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attribute_prefix = prefix.into();
        self
    }

    pub fn with_hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }
}
