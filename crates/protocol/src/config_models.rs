//! Global configuration models for `.trigger-kit/config.toml`.
//!
//! This module defines the structure of the global configuration file that
//! controls project-wide settings for trigger-kit.

use serde::Deserialize;
use serde::Serialize;

fn default_branch() -> String {
    "main".to_string()
}

/// Represents global settings from `.trigger-kit/config.toml`.
///
/// # Example
///
/// ```toml
/// # .trigger-kit/config.toml
/// default-branch = "main"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Branch assumed when a fired event does not name one.
    #[serde(default = "default_branch")]
    pub default_branch: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_branch: default_branch(),
        }
    }
}
