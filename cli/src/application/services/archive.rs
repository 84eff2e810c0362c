//! Archive fetching: download the pinned tarball and unpack it.
//!
//! Both steps are idempotent through the filesystem: an existing archive or
//! unpack directory short-circuits the work. Imports only from
//! `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{ArchiveDownloader, CommandRunner, LocalFs, ProgressReporter};
use crate::domain::{CommandInvocation, InstallLayout, LifecycleError};

/// Whether a fetch step did any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    AlreadyPresent,
    Fetched,
}

/// Download the archive unless a file already sits at `layout.archive_path`.
///
/// An existing file is trusted as-is; its content is not re-validated.
///
/// # Errors
///
/// Returns [`LifecycleError::Download`] if the download fails.
pub async fn ensure_downloaded(
    layout: &InstallLayout,
    downloader: &impl ArchiveDownloader,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
) -> Result<FetchOutcome> {
    if fs.exists(&layout.archive_path) {
        tracing::debug!(path = %layout.archive_path.display(), "archive already present");
        return Ok(FetchOutcome::AlreadyPresent);
    }

    reporter.step("Downloading zeppelin; this may take a few minutes");
    downloader
        .download(&layout.archive_url, &layout.archive_path)
        .await
        .map_err(|e| LifecycleError::Download {
            url: layout.archive_url.clone(),
            reason: format!("{e:#}"),
        })?;
    reporter.success(&format!("downloaded {}", layout.archive_path.display()));
    Ok(FetchOutcome::Fetched)
}

/// Unpack the archive with `tar` unless `layout.unpacked_dir` already exists.
///
/// `tar` runs inside `layout.base_dir` with its output captured to
/// `layout.unpack_log_path`. The log is removed on success and kept on failure.
///
/// # Errors
///
/// Returns the command error if `tar` cannot launch, exits non-zero, or does
/// not finish within `timeout`.
pub async fn ensure_unpacked(
    layout: &InstallLayout,
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    timeout: Duration,
) -> Result<FetchOutcome> {
    if fs.exists(&layout.unpacked_dir) {
        tracing::debug!(path = %layout.unpacked_dir.display(), "archive already unpacked");
        return Ok(FetchOutcome::AlreadyPresent);
    }

    let archive = layout.archive_path.to_string_lossy().into_owned();
    let invocation = CommandInvocation::new("tar", ["-xvf".to_string(), archive], timeout)
        .in_dir(&layout.base_dir)
        .log_to(&layout.unpack_log_path);

    reporter.step("Unpacking zeppelin archive...");
    let outcome = runner.run(&invocation).await;
    if let Err(err) = outcome.into_result(&invocation) {
        reporter.warn(&format!(
            "unpack output kept at {}",
            layout.unpack_log_path.display()
        ));
        return Err(err.into());
    }

    if fs.exists(&layout.unpack_log_path) {
        if let Err(e) = fs.remove_file(&layout.unpack_log_path) {
            tracing::warn!(error = %e, "could not remove unpack log");
        }
    }
    reporter.success(&format!(
        "Zeppelin successfully downloaded and unpacked to {}",
        layout.base_dir.display()
    ));
    Ok(FetchOutcome::Fetched)
}
