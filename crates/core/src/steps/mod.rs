//! Step runner abstraction and implementations.
//!
//! This module provides the `StepRunner` trait (Adapter Pattern) and the
//! `StepManager` for resolving workflow step definitions to runners.

pub mod base;
pub mod builtin;
pub mod manager;
pub mod mock;
pub mod shell;

pub use base::{StepContext, StepError, StepOutput, StepRunner, StepStream};
pub use builtin::{CheckoutStep, SetupRuntimeStep};
pub use manager::StepManager;
pub use mock::MockStep;
pub use shell::ShellStep;
