//! # tk-core
//!
//! Core workflow engine and step execution for trigger-kit.
//!
//! This crate provides:
//! - Configuration loading from the `.trigger-kit/` directory
//! - Trigger evaluation for incoming push / pull-request events
//! - Step runner abstraction and subprocess-backed implementations
//! - The sequential workflow execution engine
//! - Run state management and failure notification
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`trigger`]: Event-to-workflow matching
//! - [`steps`]: Step runner trait and implementations
//! - [`runtime`]: Interpreter resolution
//! - [`engine`]: Workflow execution engine
//! - [`notify`]: Failure notification channels
//! - [`state`]: Run state management
//! - [`init`]: Project scaffolding

pub mod config;
pub mod engine;
pub mod init;
pub mod notify;
pub mod runtime;
pub mod state;
pub mod steps;
pub mod trigger;
