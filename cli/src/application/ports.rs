//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;

use anyhow::Result;

use crate::domain::{CommandInvocation, CommandOutcome};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Runs one external program with a bounded wait.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `invocation` and classify what happened.
    ///
    /// Never returns an error: launch problems are reported as
    /// [`CommandOutcome::LaunchFailed`]. On timeout the child must be killed
    /// (not left orphaned) before [`CommandOutcome::TimedOut`] is returned.
    async fn run(&self, invocation: &CommandInvocation) -> CommandOutcome;
}

// ── Network Ports ─────────────────────────────────────────────────────────────

/// Fetches the distribution archive.
#[allow(async_fn_in_trait)]
pub trait ArchiveDownloader {
    /// Download `url` to `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport or HTTP failure. `dest` must not be
    /// left behind half-written.
    async fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Zeppelin's interpreter settings REST endpoint.
#[allow(async_fn_in_trait)]
pub trait InterpreterApi {
    /// POST `body` as JSON to `{zeppelin_url}/api/interpreter/setting`.
    ///
    /// Any status is returned as `Ok`; only transport failures are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if no HTTP response was received.
    async fn create_setting(&self, zeppelin_url: &str, body: Vec<u8>) -> Result<HttpReply>;
}

/// Answers "is the Zeppelin daemon currently running?".
#[allow(async_fn_in_trait)]
pub trait LivenessProbe {
    async fn is_running(&self) -> bool;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the filesystem operations services perform on the install tree.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// # Errors
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// # Errors
    /// Returns an error if the directory cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// # Errors
    /// Returns an error if the file cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// # Errors
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, content: &[u8]) -> Result<()>;
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
    /// # Errors
    /// Returns an error if the file cannot be read or is not UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
