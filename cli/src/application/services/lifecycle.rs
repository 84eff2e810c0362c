//! Zeppelin daemon lifecycle: bootstrap, start, stop, clean.
//!
//! The daemon is observed through two signals only: whether its executable
//! exists in the layout and what the injected [`LivenessProbe`] reports.
//! Any command outcome other than a zero exit aborts the operation; steps
//! already completed are left in place so a re-run picks up where this one
//! stopped. Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{
    ArchiveDownloader, CommandRunner, LivenessProbe, LocalFs, ProgressReporter,
};
use crate::application::services::archive;
use crate::domain::config::PluginSpec;
use crate::domain::{CommandInvocation, InstallLayout, LifecycleError};

/// Daemon state as observed from the filesystem and the liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonState {
    NotInstalled,
    Stopped,
    Running,
}

/// What `stop` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// No bootstrapped sandbox exists.
    NotInstalled,
    /// The probe reported the daemon as not running.
    AlreadyStopped,
    Stopped,
}

/// What `clean` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOutcome {
    pub stopped: bool,
    pub removed: bool,
}

/// Ports and layout shared by every lifecycle operation.
pub struct LifecycleController<'a, R, L, F, P> {
    pub layout: &'a InstallLayout,
    pub runner: &'a R,
    pub probe: &'a L,
    pub fs: &'a F,
    pub reporter: &'a P,
    pub timeout: Duration,
}

impl<R, L, F, P> LifecycleController<'_, R, L, F, P>
where
    R: CommandRunner,
    L: LivenessProbe,
    F: LocalFs,
    P: ProgressReporter,
{
    /// Current daemon state.
    pub async fn state(&self) -> DaemonState {
        if !self.fs.exists(&self.layout.daemon_path) {
            return DaemonState::NotInstalled;
        }
        if self.probe.is_running().await {
            DaemonState::Running
        } else {
            DaemonState::Stopped
        }
    }

    /// First-time install: fetch, unpack, start, install the plugin, restart.
    ///
    /// Configuring the interpreter is a separate step; see
    /// `application::services::interpreter::update_interpreter`.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails. Completed steps are not rolled back.
    pub async fn bootstrap(
        &self,
        downloader: &impl ArchiveDownloader,
        plugin: &PluginSpec,
    ) -> Result<()> {
        let base = &self.layout.base_dir;
        if !self.fs.exists(base) {
            self.fs
                .create_dir_all(base)
                .map_err(|e| LifecycleError::DirectoryCreation {
                    path: base.clone(),
                    reason: format!("{e:#}"),
                })?;
        }
        self.reporter
            .success(&format!("Zeppelin base dir created successfully at {}", base.display()));

        archive::ensure_downloaded(self.layout, downloader, self.fs, self.reporter).await?;
        archive::ensure_unpacked(self.layout, self.runner, self.fs, self.reporter, self.timeout)
            .await?;

        self.reporter
            .step("Finished initializing Zeppelin sandbox, attempting to start zeppelin...");
        self.start().await?;

        self.reporter.step(&format!(
            "Installing {} interpreter ({})...",
            plugin.name, plugin.artifact
        ));
        self.run_checked(CommandInvocation::new(
            &self.layout.interpreter_installer_path,
            [
                "--name",
                plugin.name.as_str(),
                "--artifact",
                plugin.artifact.as_str(),
            ],
            self.timeout,
        ))
        .await?;

        self.reporter.step("Restarting zeppelin...");
        self.daemon("restart").await?;
        self.reporter.success("Zeppelin bootstrapped");
        Ok(())
    }

    /// Run `zeppelin-daemon start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon script is missing, fails, or times out.
    pub async fn start(&self) -> Result<()> {
        self.daemon("start").await
    }

    /// Run `zeppelin-daemon stop` if there is something to stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the stop command fails or times out.
    pub async fn stop(&self) -> Result<StopOutcome> {
        match self.state().await {
            DaemonState::NotInstalled => Ok(StopOutcome::NotInstalled),
            DaemonState::Stopped => Ok(StopOutcome::AlreadyStopped),
            DaemonState::Running => {
                tracing::debug!(daemon = %self.layout.daemon_path.display(), "stopping zeppelin");
                self.daemon("stop").await?;
                Ok(StopOutcome::Stopped)
            }
        }
    }

    /// Stop a running daemon, then delete the whole base directory.
    ///
    /// Must not run concurrently with any other operation on the same root.
    ///
    /// # Errors
    ///
    /// Returns an error if stopping fails or the tree cannot be removed.
    pub async fn clean(&self) -> Result<CleanOutcome> {
        let stopped = self.state().await == DaemonState::Running;
        if stopped {
            tracing::debug!(daemon = %self.layout.daemon_path.display(), "stopping zeppelin before clean");
            self.daemon("stop").await?;
        }

        let base = &self.layout.base_dir;
        if !self.fs.exists(base) {
            return Ok(CleanOutcome {
                stopped,
                removed: false,
            });
        }
        self.fs
            .remove_dir_all(base)
            .map_err(|e| LifecycleError::Cleanup {
                path: base.clone(),
                reason: format!("{e:#}"),
            })?;
        Ok(CleanOutcome {
            stopped,
            removed: true,
        })
    }

    async fn daemon(&self, verb: &str) -> Result<()> {
        self.run_checked(CommandInvocation::new(
            &self.layout.daemon_path,
            [verb],
            self.timeout,
        ))
        .await
    }

    async fn run_checked(&self, invocation: CommandInvocation) -> Result<()> {
        tracing::debug!(command = %invocation, "running");
        let outcome = self.runner.run(&invocation).await;
        outcome.into_result(&invocation)?;
        Ok(())
    }
}
