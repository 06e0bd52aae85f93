//! Template rendering pipeline
//!
//! parse -> conditionals -> values -> each -> finalize -> serialize

use serde_json::Value;
use tracing::debug;

use crate::config::RenderOptions;
use crate::directives::DirectiveNames;
use crate::error::Result;
use crate::finalizer::finalize;
use crate::ml_parser::{serialize, HtmlParser, ParseTreeResult};
use crate::processor::DirectiveProcessor;

/// Reusable renderer for one set of options.
#[derive(Debug, Clone)]
pub struct Renderer {
    options: RenderOptions,
    names: DirectiveNames,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        let names = DirectiveNames::from_options(&options);
        Renderer { options, names }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn names(&self) -> &DirectiveNames {
        &self.names
    }

    /// Render `html` against `data`. Never fails: bad expressions hide their
    /// element and malformed directives are left as written.
    pub fn render(&self, html: &str, data: &Value) -> String {
        let ParseTreeResult {
            mut document,
            errors,
        } = HtmlParser::new().parse(html);
        for error in &errors {
            debug!(element = ?error.element_name, "{}", error.msg);
        }

        DirectiveProcessor::new(&self.names, data).process(&mut document);
        let removed = finalize(&mut document, &self.names, self.options.remove_js_attributes);
        debug!(
            removed,
            parse_errors = errors.len(),
            remove_js_attributes = self.options.remove_js_attributes,
            "rendered template"
        );

        serialize(&document)
    }

    /// Render with data given as JSON text.
    pub fn render_json(&self, html: &str, data_json: &str) -> Result<String> {
        let data: Value = serde_json::from_str(data_json)?;
        Ok(self.render(html, &data))
    }
}

/// Render with default options.
pub fn render(html: &str, data: &Value) -> String {
    Renderer::default().render(html, data)
}

pub fn render_with_options(html: &str, data: &Value, options: &RenderOptions) -> String {
    Renderer::new(options.clone()).render(html, data)
}

pub fn render_json(html: &str, data_json: &str, options: &RenderOptions) -> Result<String> {
    Renderer::new(options.clone()).render_json(html, data_json)
}
