//! Solr interpreter registration against a running Zeppelin.
//!
//! Renders the bundled template with the Solr URL, writes the document next to
//! the template, POSTs it, then removes the written file whatever the result.
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{InterpreterApi, LocalFs, ProgressReporter};
use crate::domain::template::render_interpreter;
use crate::domain::{InstallLayout, LifecycleError};

/// Read the template at `template_path` and substitute `solr_url`.
///
/// # Errors
///
/// Returns [`LifecycleError::TemplateRead`] if the template cannot be read.
pub fn render(fs: &impl LocalFs, template_path: &Path, solr_url: &str) -> Result<String> {
    let template = fs
        .read_to_string(template_path)
        .map_err(|e| LifecycleError::TemplateRead {
            path: template_path.to_path_buf(),
            reason: format!("{e:#}"),
        })?;
    Ok(render_interpreter(&template, solr_url))
}

/// Write `document` to `output_path` and POST its bytes to Zeppelin.
///
/// `output_path` is removed after the attempt, on success and failure alike.
///
/// # Errors
///
/// Returns [`LifecycleError::InterpreterWrite`] if the file cannot be written,
/// [`LifecycleError::HttpTransport`] if no response arrives, and
/// [`LifecycleError::HttpStatus`] for any status of 300 or above.
pub async fn publish(
    api: &impl InterpreterApi,
    fs: &impl LocalFs,
    zeppelin_url: &str,
    document: &str,
    output_path: &Path,
) -> Result<()> {
    fs.write(output_path, document.as_bytes())
        .map_err(|e| LifecycleError::InterpreterWrite {
            path: output_path.to_path_buf(),
            reason: format!("{e:#}"),
        })?;

    let result = post_written(api, fs, zeppelin_url, output_path).await;

    if let Err(e) = fs.remove_file(output_path) {
        tracing::warn!(path = %output_path.display(), error = %e, "could not remove interpreter setting file");
    }
    result
}

async fn post_written(
    api: &impl InterpreterApi,
    fs: &impl LocalFs,
    zeppelin_url: &str,
    output_path: &Path,
) -> Result<()> {
    let body = fs
        .read(output_path)
        .map_err(|e| LifecycleError::InterpreterWrite {
            path: output_path.to_path_buf(),
            reason: format!("{e:#}"),
        })?;

    tracing::debug!(url = zeppelin_url, bytes = body.len(), "posting interpreter setting");
    let reply = api
        .create_setting(zeppelin_url, body)
        .await
        .map_err(|e| LifecycleError::HttpTransport(format!("{e:#}")))?;

    if reply.status >= 300 {
        return Err(LifecycleError::HttpStatus {
            status: reply.status,
            body: reply.body,
        }
        .into());
    }
    tracing::debug!(status = reply.status, "interpreter setting accepted");
    Ok(())
}

/// Render and publish the Solr interpreter for the sandbox in `layout`.
///
/// # Errors
///
/// Propagates any error from [`render`] or [`publish`].
pub async fn update_interpreter(
    layout: &InstallLayout,
    api: &impl InterpreterApi,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    zeppelin_url: &str,
    solr_url: &str,
) -> Result<()> {
    let document = render(fs, &layout.interpreter_template_path, solr_url)?;
    reporter.step(&format!("Creating Solr interpreter pointing at {solr_url}..."));
    publish(
        api,
        fs,
        zeppelin_url,
        &document,
        &layout.interpreter_output_path,
    )
    .await?;
    reporter.success("Solr interpreter created");
    Ok(())
}
