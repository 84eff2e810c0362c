//! External command descriptions and their classified outcomes.
//!
//! Plain data; spawning happens in `crate::infra::command_runner`.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::error::LifecycleError;

/// Where a child's stdout/stderr go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Share the invoking process's streams.
    Inherit,
    /// Truncate and write both streams to this file.
    LogFile(PathBuf),
}

/// One bounded subprocess call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub timeout: Duration,
    pub output: OutputTarget,
}

impl CommandInvocation {
    /// Invocation with inherited streams and no working directory override.
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
            timeout,
            output: OutputTarget::Inherit,
        }
    }

    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn log_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = OutputTarget::LogFile(path.into());
        self
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Result of a bounded subprocess call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exited before the timeout. `None` means terminated by a signal.
    Completed(Option<i32>),
    /// Still running when the timeout fired; the child has been killed.
    TimedOut,
    /// Could not be started at all.
    LaunchFailed(String),
}

impl CommandOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(Some(0)))
    }

    /// Anything but `Completed(Some(0))` becomes the matching error.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::CommandTimedOut`], [`LifecycleError::CommandFailed`]
    /// or [`LifecycleError::CommandLaunch`].
    pub fn into_result(self, invocation: &CommandInvocation) -> Result<(), LifecycleError> {
        let command = invocation.to_string();
        match self {
            Self::Completed(Some(0)) => Ok(()),
            Self::Completed(code) => Err(LifecycleError::CommandFailed {
                command,
                code: code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
            }),
            Self::TimedOut => Err(LifecycleError::CommandTimedOut {
                command,
                secs: invocation.timeout.as_secs(),
            }),
            Self::LaunchFailed(reason) => Err(LifecycleError::CommandLaunch { command, reason }),
        }
    }
}
