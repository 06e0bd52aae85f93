/**
 * Attribute Template CLI
 *
 * File handling behind the `render-template` binary: loading data and
 * options, rendering templates to stdout or to an output directory
 */
use anyhow::{bail, Context, Result};
use attr_template::{RenderOptions, Renderer};
use rayon::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load the data context. No file means an empty object.
pub fn load_data(path: Option<&Path>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Object(Default::default()));
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path.display()))?;
    let data = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in data file {}", path.display()))?;
    Ok(data)
}

/// Load render options from a JSON config file, or the defaults.
pub fn load_options(path: Option<&Path>) -> Result<RenderOptions> {
    let Some(path) = path else {
        return Ok(RenderOptions::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let options = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(options)
}

pub fn render_file(renderer: &Renderer, template: &Path, data: &Value) -> Result<String> {
    let html = fs::read_to_string(template)
        .with_context(|| format!("Failed to read template {}", template.display()))?;
    Ok(renderer.render(&html, data))
}

/// Render every template into `out_dir`, keeping file names. Templates are
/// rendered in parallel; the first failure is returned.
pub fn render_to_dir(
    renderer: &Renderer,
    templates: &[PathBuf],
    data: &Value,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    templates
        .par_iter()
        .map(|template| -> Result<PathBuf> {
            let Some(file_name) = template.file_name() else {
                bail!("Template path has no file name: {}", template.display());
            };
            let output = render_file(renderer, template, data)?;
            let target = out_dir.join(file_name);
            fs::write(&target, output)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            info!(template = %template.display(), output = %target.display(), "rendered");
            Ok(target)
        })
        .collect()
}

/// Install the `tracing` subscriber. `RUST_LOG` overrides the default `warn`.
pub fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignore a second initialization
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
