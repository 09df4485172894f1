//! Shell command step runner.
//!
//! Spawns a workflow's `run:` command as a subprocess via `sh -c` and
//! streams its output line by line. The only contract with the command is
//! its exit code: zero succeeds, anything else fails the step.

use crate::steps::base::{StepContext, StepError, StepOutput, StepRunner, StepStream};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::process::Command;

/// Runs a shell command in the run's working directory.
pub struct ShellStep {
    command: String,
}

impl ShellStep {
    /// Create a new shell step for the given command line.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl StepRunner for ShellStep {
    async fn check_availability(&self) -> bool {
        which::which("sh").is_ok()
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepStream, StepError> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c");
        cmd.arg(&self.command);
        cmd.current_dir(&ctx.working_dir);
        cmd.env("TK_PROJECT_DIR", &ctx.project_dir);
        if let Some(interpreter) = &ctx.interpreter {
            cmd.env("TK_PYTHON", interpreter);
        }
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let command = self.command.clone();
        let stream = async_stream::stream! {
            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(e) => {
                    yield Err(StepError::Spawn(format!("'{command}': {e}")));
                    return;
                }
            };

            let stdout = match child.stdout.take() {
                Some(stdout) => stdout,
                None => {
                    yield Err(StepError::Execution("Failed to capture stdout".to_string()));
                    return;
                }
            };

            // Drain stderr concurrently so the child never blocks on a
            // full pipe; its lines are replayed after stdout finishes.
            let stderr = child.stderr.take();
            let stderr_task = tokio::spawn(async move {
                let mut lines = Vec::new();
                if let Some(stderr) = stderr {
                    let reader = BufReader::new(stderr);
                    let mut stderr_lines = reader.lines();
                    while let Ok(Some(line)) = stderr_lines.next_line().await {
                        lines.push(line);
                    }
                }
                lines
            });

            let reader = BufReader::new(stdout);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                yield Ok(StepOutput::Line(line));
            }

            if let Ok(captured) = stderr_task.await {
                for line in captured {
                    yield Ok(StepOutput::Line(line));
                }
            }

            match child.wait().await {
                Ok(status) if status.success() => {
                    yield Ok(StepOutput::Completed);
                }
                Ok(status) => {
                    yield Err(StepError::NonZeroExit {
                        code: status.code().unwrap_or(-1),
                    });
                }
                Err(e) => {
                    yield Err(StepError::Execution(format!(
                        "Failed to wait for '{command}': {e}"
                    )));
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
