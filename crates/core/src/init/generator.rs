//! Directory structure and file generation for .trigger-kit initialization.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for initializing a .trigger-kit directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where .trigger-kit will be created.
    pub target_dir: PathBuf,

    /// Overwrite existing .trigger-kit directory if it exists.
    pub force: bool,

    /// Create only the build-and-deploy workflow template.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a complete .trigger-kit directory structure with templates.
///
/// Creates the following structure:
/// ```text
/// .trigger-kit/
/// ├── config.toml
/// └── workflows/
///     ├── build-and-deploy.yaml
///     └── hello.yaml (unless minimal)
/// ```
///
/// # Errors
///
/// Returns an `InitError` if the directory already exists without the
/// force flag, a template is missing, or a filesystem operation fails.
pub async fn generate_trigger_kit_structure(options: InitOptions) -> InitResult<()> {
    let tk_dir = options.target_dir.join(".trigger-kit");

    if tk_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(tk_dir));
    }

    fs::create_dir_all(tk_dir.join("workflows")).map_err(|source| InitError::DirectoryCreate {
        path: tk_dir.join("workflows"),
        source,
    })?;

    write_template_file(&tk_dir, "config.toml")?;

    if options.minimal {
        write_template_file(&tk_dir, "workflows/build-and-deploy.yaml")?;
    } else {
        for workflow_path in list_templates("workflows/") {
            write_template_file(&tk_dir, &workflow_path)?;
        }
    }

    Ok(())
}

/// Write one embedded template into the target directory.
fn write_template_file(tk_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = tk_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })?;

    Ok(())
}
