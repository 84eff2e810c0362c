//! `update-interpreter`: create the Solr interpreter in a running Zeppelin.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::interpreter;
use crate::domain::LifecycleAction;
use crate::output::TerminalReporter;

/// Run `update-interpreter`.
///
/// # Errors
///
/// Returns an error if the template is unreadable or Zeppelin rejects the
/// setting.
pub async fn run(app: &AppContext) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    interpreter::update_interpreter(
        &app.layout,
        &app.interpreter,
        &app.fs,
        &reporter,
        &app.settings.zeppelin_url,
        &app.settings.solr_url,
    )
    .await?;
    app.finish(LifecycleAction::UpdateInterpreter, "updated")
}
