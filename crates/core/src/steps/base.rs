//! Base StepRunner trait and supporting types.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;
use tokio_stream::Stream;

/// Context information passed to step runners during execution.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// The project root (where `.trigger-kit/` lives).
    pub project_dir: PathBuf,

    /// The clean per-run working directory steps execute in.
    pub working_dir: PathBuf,

    /// Resolved interpreter for the workflow's runtime, if any.
    pub interpreter: Option<PathBuf>,
}

impl StepContext {
    /// Create a new StepContext for the given project and working
    /// directories.
    pub fn new(project_dir: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            working_dir: working_dir.into(),
            interpreter: None,
        }
    }

    /// Set the resolved interpreter path.
    pub fn with_interpreter(mut self, interpreter: Option<PathBuf>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// The working directory as a Path.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

/// Output produced by a step while it executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutput {
    /// One line of step output.
    Line(String),

    /// The step finished successfully.
    Completed,
}

/// Errors produced by step execution.
///
/// There is exactly one failure mode from the run's point of view: the
/// step did not succeed. The variants only preserve detail for logs and
/// the failure notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The runner cannot execute in this environment.
    #[error("Step not available: {0}")]
    NotAvailable(String),

    /// The subprocess could not be spawned.
    #[error("Failed to spawn command: {0}")]
    Spawn(String),

    /// The subprocess exited with a non-zero code.
    #[error("Command exited with code {code}")]
    NonZeroExit { code: i32 },

    /// Any other execution fault.
    #[error("Execution failed: {0}")]
    Execution(String),
}

/// Stream of step outputs.
pub type StepStream = Pin<Box<dyn Stream<Item = Result<StepOutput, StepError>> + Send>>;

/// A single executable unit of work within a run.
///
/// Implementations either succeed (the stream ends after `Completed`) or
/// fail by yielding an error, which aborts the run's remaining steps.
#[async_trait]
pub trait StepRunner: Send + Sync {
    /// Whether this runner can execute in the current environment.
    async fn check_availability(&self) -> bool;

    /// Execute the step, producing a stream of output lines.
    async fn execute(&self, ctx: &StepContext) -> Result<StepStream, StepError>;
}
