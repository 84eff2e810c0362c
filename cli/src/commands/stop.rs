//! `stop`: stop Zeppelin if it is installed and running.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::lifecycle::StopOutcome;
use crate::domain::LifecycleAction;
use crate::output::TerminalReporter;

/// Run `stop`.
///
/// # Errors
///
/// Returns an error if the stop command fails or times out.
pub async fn run(app: &AppContext) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    let outcome = app.controller(&reporter).stop().await?;
    let word = match outcome {
        StopOutcome::NotInstalled => {
            app.output.success("No Zeppelin sandbox to stop.");
            "not_installed"
        }
        StopOutcome::AlreadyStopped => {
            app.output.success("Zeppelin is already stopped.");
            "already_stopped"
        }
        StopOutcome::Stopped => {
            app.output.success("Zeppelin stopped.");
            "stopped"
        }
    };
    app.finish(LifecycleAction::Stop, word)
}
