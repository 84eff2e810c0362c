//! Interpreter setting template rendering.

/// Literal token replaced with the Solr URL. No other template syntax exists.
pub const SOLR_URL_PLACEHOLDER: &str = "@@SOLR_URL@@";

/// Replace every occurrence of [`SOLR_URL_PLACEHOLDER`] with `solr_url`.
///
/// The URL is inserted verbatim; `$` and `\` carry no special meaning.
#[must_use]
pub fn render_interpreter(template: &str, solr_url: &str) -> String {
    template.replace(SOLR_URL_PLACEHOLDER, solr_url)
}
