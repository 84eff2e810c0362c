//! `start`: start an already-bootstrapped Zeppelin.

use anyhow::Result;

use crate::app::AppContext;
use crate::domain::LifecycleAction;
use crate::output::TerminalReporter;

/// Run `start`.
///
/// # Errors
///
/// Returns an error if the daemon script is missing, fails, or times out.
pub async fn run(app: &AppContext) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    app.output.step("Starting zeppelin...");
    app.controller(&reporter).start().await?;
    app.output.success("Zeppelin started");
    app.finish(LifecycleAction::Start, "started")
}
