//! Tool runner abstraction
//!
//! Defines the trait used to execute external tools, with a real
//! process-backed implementation and a mock for testing.

use std::fmt;
use std::process::{ExitStatus, Stdio};

use contracts::{PipelineError, Result, ToolCommand};
use tokio::process::Command;
use tracing::{debug, info};

/// Exit outcome of a tool process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
}

impl ToolExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ToolExit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ToolExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exited with status {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Tool runner trait
///
/// Runs one command to completion and reports its exit. Output streams are
/// not captured.
#[trait_variant::make(ToolRunner: Send)]
pub trait LocalToolRunner {
    /// Run `command`, waiting for it to exit
    ///
    /// # Errors
    /// `ToolInvocation` when the process cannot be started
    async fn run(&self, command: &ToolCommand) -> Result<ToolExit>;
}

/// Runs tools as child processes with inherited stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolExit> {
        debug!(step = %command.step, program = %command.program.display(), "Spawning tool");

        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                PipelineError::tool_invocation(
                    command.step,
                    &command.program,
                    format!("failed to start: {e}"),
                )
            })?;

        Ok(ToolExit::from(status))
    }
}

/// Run a step and turn a nonzero exit into `ToolInvocation`
pub async fn run_checked<R: ToolRunner>(runner: &R, command: &ToolCommand) -> Result<()> {
    info!(step = %command.step, program = %command.program.display(), "Running tool");

    let exit = runner.run(command).await?;
    if !exit.success() {
        return Err(PipelineError::tool_invocation(
            command.step,
            &command.program,
            exit.to_string(),
        ));
    }

    debug!(step = %command.step, "Tool finished");
    Ok(())
}
