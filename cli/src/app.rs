//! Application context: unified state passed to every command handler.
//!
//! Built once in `Cli::run()` from the resolved `Settings`; command handlers
//! borrow the ports from here instead of constructing their own.

use crate::application::ports::ProgressReporter;
use crate::application::services::lifecycle::LifecycleController;
use crate::domain::{InstallLayout, LifecycleAction, Platform, Settings};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::download::UreqDownloader;
use crate::infra::fs::LocalFs;
use crate::infra::http::UreqInterpreterClient;
use crate::infra::liveness::Liveness;
use crate::output::{OutputContext, json};

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode, JSON mode).
    pub output: OutputContext,
    /// Resolved per-run settings.
    pub settings: Settings,
    /// Paths derived from `settings.install_root`.
    pub layout: InstallLayout,
    pub runner: TokioCommandRunner,
    pub fs: LocalFs,
    pub probe: Liveness,
    pub downloader: UreqDownloader,
    pub interpreter: UreqInterpreterClient,
}

impl AppContext {
    #[must_use]
    pub fn new(output: OutputContext, settings: Settings) -> Self {
        let layout = InstallLayout::new(
            &settings.install_root,
            &settings.release,
            Platform::current(),
        );
        let probe = Liveness::from_kind(settings.liveness, &settings.zeppelin_url);
        let downloader = UreqDownloader::new(!output.show_progress());
        // --json implies quiet; stdout then belongs to the result object.
        let runner = TokioCommandRunner::new().stdout_to_stderr(output.quiet);
        Self {
            output,
            settings,
            layout,
            runner,
            fs: LocalFs,
            probe,
            downloader,
            interpreter: UreqInterpreterClient::new(),
        }
    }

    /// Lifecycle controller over this context's ports.
    #[must_use]
    pub fn controller<'a, P: ProgressReporter>(
        &'a self,
        reporter: &'a P,
    ) -> LifecycleController<'a, TokioCommandRunner, Liveness, LocalFs, P> {
        LifecycleController {
            layout: &self.layout,
            runner: &self.runner,
            probe: &self.probe,
            fs: &self.fs,
            reporter,
            timeout: self.settings.process_timeout,
        }
    }

    /// Print the JSON success object when `--json` is active.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn finish(&self, action: LifecycleAction, outcome: &str) -> anyhow::Result<()> {
        if self.output.json {
            println!("{}", json::format_success(action.as_str(), outcome)?);
        }
        Ok(())
    }
}
