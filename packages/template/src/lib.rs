#![deny(clippy::all)]

/**
 * Attribute Template - NAPI-RS Implementation
 *
 * HTML templating driven by `if`, `if-not`, `value` and `each` attributes,
 * with optional Node.js bindings
 */

#[cfg(feature = "napi-bindings")]
use napi::bindgen_prelude::*;
#[cfg(feature = "napi-bindings")]
use napi_derive::napi;

pub mod chars;
pub mod config;
pub mod directives;
pub mod display;
pub mod error;
pub mod finalizer;
pub mod path_resolver;
pub mod processor;
pub mod renderer;
pub mod scope;

// Parser modules
pub mod expression_parser;
pub mod ml_parser;

// Re-exports
pub use config::RenderOptions;
pub use error::{Result as TemplateResult, TemplateError};
pub use renderer::{render, render_json, render_with_options, Renderer};

/// Render a template from Node.js. `data_json` is the data context as JSON
/// text.
#[cfg(feature = "napi-bindings")]
#[napi]
pub fn render_template(
    html: String,
    data_json: String,
    remove_js_attributes: Option<bool>,
) -> Result<String> {
    let options = RenderOptions::new().with_remove_js_attributes(remove_js_attributes.unwrap_or(false));
    render_json(&html, &data_json, &options)
        .map_err(|e| Error::new(Status::InvalidArg, e.to_string()))
}

/// Render with a full options object, e.g. `{ "attributePrefix": "js-" }`.
#[cfg(feature = "napi-bindings")]
#[napi]
pub fn render_template_with_options(
    html: String,
    data_json: String,
    options_json: String,
) -> Result<String> {
    let options: RenderOptions = serde_json::from_str(&options_json)
        .map_err(|e| Error::new(Status::InvalidArg, format!("invalid options: {}", e)))?;
    render_json(&html, &data_json, &options)
        .map_err(|e| Error::new(Status::InvalidArg, e.to_string()))
}
