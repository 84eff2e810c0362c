//! JSON output helpers for `--json`.
//!
//! Success and failure each print exactly one pretty-printed object on stdout.

use anyhow::{Context, Result};

/// Format the error object printed when an action fails.
///
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the object printed when an action completes.
///
/// `outcome` is a short snake_case word such as `stopped` or `not_installed`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_success(action: &str, outcome: &str) -> Result<String> {
    let obj = serde_json::json!({
        "ok": true,
        "action": action,
        "outcome": outcome,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
