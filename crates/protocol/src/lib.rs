//! # tk-protocol
//!
//! Core protocol definitions and data models for trigger-kit.
//!
//! This crate defines all shared data structures used for:
//! - Configuration file parsing (YAML workflows, TOML config)
//! - Runtime run state management
//! - Progress reporting between the engine and the CLI front end
//!
//! ## Modules
//!
//! - [`config_models`]: Global configuration from config.toml
//! - [`event_models`]: Trigger event descriptors
//! - [`workflow_models`]: Workflow definitions and steps
//! - [`run_models`]: Runtime run state and status
//! - [`ipc`]: Events emitted by the engine during a run
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, uuid, and chrono
//! - Independent compilation: No dependencies on other trigger-kit crates

pub mod config_models;
pub mod event_models;
pub mod ipc;
pub mod run_models;
pub mod workflow_models;

// Re-export all public types for convenience
pub use config_models::*;
pub use event_models::*;
pub use ipc::*;
pub use run_models::*;
pub use workflow_models::*;
