//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with guaranteed timeout and kill on all platforms.

use std::fs::File;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;
use crate::domain::{CommandInvocation, CommandOutcome, OutputTarget};

/// Production `CommandRunner`.
///
/// On Windows, `tokio::time::timeout` around `.wait().await` does NOT kill
/// the child process when the timeout fires; the future is dropped but the
/// OS process keeps running. This implementation uses `tokio::select!` with
/// explicit `child.kill()` so a timed-out child is always terminated.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner {
    stdout_to_stderr: bool,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send inherited child stdout to our stderr, keeping stdout for
    /// machine-readable results.
    #[must_use]
    pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    fn stdio_for(&self, target: &OutputTarget) -> Result<(Stdio, Stdio)> {
        match target {
            OutputTarget::Inherit if self.stdout_to_stderr => {
                Ok((Stdio::from(std::io::stderr()), Stdio::inherit()))
            }
            OutputTarget::Inherit => Ok((Stdio::inherit(), Stdio::inherit())),
            OutputTarget::LogFile(path) => log_file_stdio(path),
        }
    }
}

/// Both streams into one truncated log file.
fn log_file_stdio(path: &Path) -> Result<(Stdio, Stdio)> {
    let out =
        File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let err = out
        .try_clone()
        .with_context(|| format!("cloning log handle {}", path.display()))?;
    Ok((Stdio::from(out), Stdio::from(err)))
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, invocation: &CommandInvocation) -> CommandOutcome {
        let (stdout, stderr) = match self.stdio_for(&invocation.output) {
            Ok(pair) => pair,
            Err(e) => return CommandOutcome::LaunchFailed(format!("{e:#}")),
        };

        let mut command = tokio::process::Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true);
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => return CommandOutcome::LaunchFailed(e.to_string()),
        };
        tracing::debug!(command = %invocation, pid = ?child.id(), "spawned");

        tokio::select! {
            status = child.wait() => match status {
                Ok(status) => CommandOutcome::Completed(status.code()),
                Err(e) => CommandOutcome::LaunchFailed(format!("waiting for child: {e}")),
            },
            () = tokio::time::sleep(invocation.timeout) => {
                if let Err(e) = child.kill().await {
                    tracing::warn!(command = %invocation, error = %e, "failed to kill timed-out child");
                }
                CommandOutcome::TimedOut
            }
        }
    }
}
