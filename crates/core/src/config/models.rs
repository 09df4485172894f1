//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines
//! global settings and workflow definitions into a single configuration
//! object.

use tk_protocol::config_models::GlobalConfig;
use tk_protocol::workflow_models::Workflow;

/// Unified application configuration loaded from the `.trigger-kit/`
/// directory.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: Global settings
/// - `workflows/*.yaml`: Workflow definitions
///
/// # Example
///
/// ```rust,no_run
/// use tk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("."))?;
/// println!("Loaded {} workflows", config.workflows.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// All workflow definitions loaded from `workflows/*.yaml`.
    pub workflows: Vec<Workflow>,
}

impl AppConfig {
    /// Look up a workflow by name.
    pub fn find_workflow(&self, name: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.name == name)
    }
}
