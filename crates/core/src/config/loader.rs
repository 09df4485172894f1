//! Configuration file loader for the `.trigger-kit/` directory structure.
//!
//! This module provides functionality to load and parse all configuration
//! files from the `.trigger-kit/` directory, including:
//! - `config.toml`: Global settings
//! - `workflows/*.yaml`: Workflow definitions

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use std::collections::HashSet;
use std::path::Path;
use tk_protocol::config_models::GlobalConfig;
use tk_protocol::workflow_models::{NotifyChannel, Workflow};
use walkdir::WalkDir;

/// Loads all configuration from the `.trigger-kit/` directory.
///
/// This function scans the `.trigger-kit/` directory and loads:
/// - Global configuration from `config.toml`
/// - Workflow definitions from `workflows/*.yaml` files
///
/// # Arguments
///
/// * `root` - Root directory containing the `.trigger-kit/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. If directories or
/// files are missing (but the root exists), returns an empty/default
/// configuration rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid syntax (TOML or YAML)
/// - A workflow is structurally invalid (no steps, duplicate name, or a
///   `command` failure channel without a command)
pub fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let tk_dir = root.join(".trigger-kit");

    // If .trigger-kit doesn't exist, return default config
    if !tk_dir.exists() {
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&tk_dir)?;
    let workflows = load_workflows(&tk_dir)?;

    Ok(AppConfig { global, workflows })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(tk_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = tk_dir.join("config.toml");

    // If config.toml doesn't exist, return default
    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}

/// Loads all workflow definitions from `workflows/*.yaml`.
fn load_workflows(tk_dir: &Path) -> ConfigResult<Vec<Workflow>> {
    let workflows_dir = tk_dir.join("workflows");

    // If workflows directory doesn't exist, return empty vector
    if !workflows_dir.exists() {
        return Ok(Vec::new());
    }

    let mut workflows = Vec::new();
    let mut seen_names = HashSet::new();

    // Walk through all .yaml and .yml files in the workflows directory
    for entry in WalkDir::new(&workflows_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: workflows_dir.clone(),
            source,
        })?;

        let path = entry.path();

        // Only process .yaml and .yml files
        let ext = path.extension().and_then(|s| s.to_str());
        if ext != Some("yaml") && ext != Some("yml") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let workflow: Workflow =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;

        validate_workflow(&workflow, path)?;

        if !seen_names.insert(workflow.name.clone()) {
            return Err(ConfigError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("duplicate workflow name '{}'", workflow.name),
            });
        }

        workflows.push(workflow);
    }

    Ok(workflows)
}

/// Structural validation beyond what serde enforces.
fn validate_workflow(workflow: &Workflow, path: &Path) -> ConfigResult<()> {
    if workflow.steps.is_empty() {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: format!("workflow '{}' has no steps", workflow.name),
        });
    }

    if let Some(on_failure) = &workflow.on_failure {
        if on_failure.notify == NotifyChannel::Command && on_failure.command.is_none() {
            return Err(ConfigError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!(
                    "workflow '{}' uses the command notify channel but sets no command",
                    workflow.name
                ),
            });
        }
    }

    Ok(())
}
