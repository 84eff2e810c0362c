//! `clean`: stop Zeppelin if needed and delete the sandbox.

use anyhow::Result;

use crate::app::AppContext;
use crate::domain::LifecycleAction;
use crate::output::TerminalReporter;

/// Run `clean`.
///
/// # Errors
///
/// Returns an error if Zeppelin cannot be stopped or the directory removed.
pub async fn run(app: &AppContext) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    let outcome = app.controller(&reporter).clean().await?;
    let base = app.layout.base_dir.display();
    if outcome.removed {
        app.output.success(&format!("Removed {base}"));
        app.finish(LifecycleAction::Clean, "removed")
    } else {
        app.output.success(&format!("Nothing to clean at {base}"));
        app.finish(LifecycleAction::Clean, "nothing_to_clean")
    }
}
