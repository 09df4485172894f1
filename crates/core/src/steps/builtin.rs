//! Built-in step runners provided by trigger-kit itself.
//!
//! - `CheckoutStep`: materializes the project source inside the run's
//!   clean working directory.
//! - `SetupRuntimeStep`: verifies the workflow's interpreter requirement
//!   against what the engine resolved.

use crate::steps::base::{StepContext, StepError, StepOutput, StepRunner, StepStream};
use async_trait::async_trait;
use std::path::Path;
use walkdir::WalkDir;

/// Copies the project tree into the run's working directory.
///
/// Dot-entries (`.git`, `.trigger-kit`, editor droppings) are skipped so
/// a run never sees runner configuration or repository internals.
pub struct CheckoutStep;

impl CheckoutStep {
    pub fn new() -> Self {
        Self
    }

    fn copy_tree(source: &Path, dest: &Path) -> Result<usize, StepError> {
        let mut copied = 0usize;

        let walker = WalkDir::new(source).min_depth(1).into_iter();
        for entry in walker.filter_entry(|e| {
            !e.file_name()
                .to_str()
                .map(|name| name.starts_with('.'))
                .unwrap_or(false)
        }) {
            let entry =
                entry.map_err(|e| StepError::Execution(format!("checkout walk failed: {e}")))?;

            let relative = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| StepError::Execution(format!("checkout path error: {e}")))?;
            let target = dest.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target).map_err(|e| {
                    StepError::Execution(format!(
                        "failed to create {}: {e}",
                        target.display()
                    ))
                })?;
            } else if entry.file_type().is_file() {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StepError::Execution(format!(
                            "failed to create {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                std::fs::copy(entry.path(), &target).map_err(|e| {
                    StepError::Execution(format!("failed to copy {}: {e}", relative.display()))
                })?;
                copied += 1;
            }
            // Symlinks and other special files are deliberately not carried
            // into the run workspace.
        }

        Ok(copied)
    }
}

impl Default for CheckoutStep {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StepRunner for CheckoutStep {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepStream, StepError> {
        if !ctx.project_dir.is_dir() {
            return Err(StepError::NotAvailable(format!(
                "project directory {} does not exist",
                ctx.project_dir.display()
            )));
        }

        let copied = Self::copy_tree(&ctx.project_dir, &ctx.working_dir)?;

        let stream = tokio_stream::iter(vec![
            Ok(StepOutput::Line(format!(
                "checked out {copied} file(s) into {}",
                ctx.working_dir.display()
            ))),
            Ok(StepOutput::Completed),
        ]);

        Ok(Box::pin(stream))
    }
}

/// Verifies that the workflow's interpreter requirement was satisfied.
///
/// The engine resolves the selector once per run; this step reports the
/// chosen binary, or fails the run when nothing on PATH matched.
pub struct SetupRuntimeStep {
    selector: String,
}

impl SetupRuntimeStep {
    /// Create a setup step for the given interpreter selector.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

#[async_trait]
impl StepRunner for SetupRuntimeStep {
    async fn check_availability(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepStream, StepError> {
        let interpreter = ctx.interpreter.clone().ok_or_else(|| {
            StepError::NotAvailable(format!(
                "no interpreter matching '{}' found on PATH",
                self.selector
            ))
        })?;

        let stream = tokio_stream::iter(vec![
            Ok(StepOutput::Line(format!(
                "using python {} -> {}",
                self.selector,
                interpreter.display()
            ))),
            Ok(StepOutput::Completed),
        ]);

        Ok(Box::pin(stream))
    }
}
