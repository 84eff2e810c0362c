//! `bootstrap`: first-time install of the Zeppelin sandbox.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::{interpreter, readiness};
use crate::domain::LifecycleAction;
use crate::output::{TerminalReporter, progress};

/// Run `bootstrap`.
///
/// Without `--await-ready`, creating the Solr interpreter is left to a
/// follow-up `update-interpreter` run once Zeppelin is up.
///
/// # Errors
///
/// Returns an error if any install step fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let reporter = TerminalReporter::new(&app.output);
    app.controller(&reporter)
        .bootstrap(&app.downloader, &app.settings.plugin)
        .await?;

    if !app.settings.await_ready {
        app.output.hint(&format!(
            "Once Zeppelin is up, run: solr-zeppelin -a update-interpreter -s {} -z {} --install-dir {}",
            app.settings.solr_url,
            app.settings.zeppelin_url,
            app.settings.install_root.display()
        ));
        return app.finish(LifecycleAction::Bootstrap, "bootstrapped");
    }

    let pb = app
        .output
        .show_progress()
        .then(|| progress::spinner("Waiting for Zeppelin to come up..."));
    let ready = readiness::wait_until_ready(&app.probe, app.settings.readiness).await;
    if let Some(pb) = &pb {
        if ready.is_ok() {
            progress::finish_ok(pb, "Zeppelin is up");
        } else {
            pb.finish_and_clear();
        }
    }
    ready?;

    interpreter::update_interpreter(
        &app.layout,
        &app.interpreter,
        &app.fs,
        &reporter,
        &app.settings.zeppelin_url,
        &app.settings.solr_url,
    )
    .await?;
    app.finish(LifecycleAction::Bootstrap, "bootstrapped_and_configured")
}
