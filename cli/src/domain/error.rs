//! Typed lifecycle errors.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! Services raise these through `anyhow`; the entrypoint downcasts them to
//! pick the machine-readable code for `--json` output.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure that aborts the current action.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Invalid action value [{0}]; unable to proceed")]
    InvalidAction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to create base directory [{}] for Zeppelin install: {reason}", path.display())]
    DirectoryCreation { path: PathBuf, reason: String },

    #[error("Failed to download Zeppelin from {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Command [{command}] did not finish within {secs} seconds; aborting")]
    CommandTimedOut { command: String, secs: u64 },

    #[error("Command [{command}] failed with code: {code}. Aborting.")]
    CommandFailed { command: String, code: String },

    #[error("Command [{command}] could not be launched: {reason}")]
    CommandLaunch { command: String, reason: String },

    #[error("Unable to read interpreter template [{}]: {reason}", path.display())]
    TemplateRead { path: PathBuf, reason: String },

    #[error("Unable to write interpreter setting [{}]: {reason}", path.display())]
    InterpreterWrite { path: PathBuf, reason: String },

    #[error("Received [{status}] status when creating Solr interpreter; aborting.\n{body}")]
    HttpStatus { status: u16, body: String },

    #[error("Error encountered creating/updating Solr interpreter: {0}")]
    HttpTransport(String),

    #[error("Unable to remove [{}]: {reason}", path.display())]
    Cleanup { path: PathBuf, reason: String },

    #[error("Zeppelin did not become ready within {secs} seconds")]
    ReadinessTimeout { secs: u64 },
}

impl LifecycleError {
    /// Stable machine-readable code, used in JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAction(_) => "invalid_action",
            Self::InvalidConfig(_) => "invalid_config",
            Self::DirectoryCreation { .. } => "directory_creation",
            Self::Download { .. } => "download",
            Self::CommandTimedOut { .. } => "command_timed_out",
            Self::CommandFailed { .. } => "command_failed",
            Self::CommandLaunch { .. } => "command_launch",
            Self::TemplateRead { .. } => "template_read",
            Self::InterpreterWrite { .. } => "interpreter_write",
            Self::HttpStatus { .. } => "http_status",
            Self::HttpTransport(_) => "http_transport",
            Self::Cleanup { .. } => "cleanup",
            Self::ReadinessTimeout { .. } => "readiness_timeout",
        }
    }
}

/// Code for any error reaching the entrypoint; untyped errors are `internal`.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<LifecycleError>())
        .map_or("internal", LifecycleError::code)
}

/// Process exit status for a failed invocation.
///
/// Every reported failure maps to `1`; usage errors are left to clap.
#[must_use]
pub fn exit_code(_err: &anyhow::Error) -> u8 {
    1
}
