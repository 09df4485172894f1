//! Embedded template files for .trigger-kit initialization.
//!
//! Uses `rust-embed` to embed the project root `templates/` directory
//! into the binary at compile time, so `trigger init` works without
//! external file dependencies.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// With the `debug-embed` feature, files are read from the filesystem at
/// runtime during development.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path relative to the templates root
/// (e.g. "config.toml", "workflows/hello.yaml").
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files under a prefix (e.g. "workflows/").
pub fn list_templates(prefix: &str) -> Vec<String> {
    TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect()
}
