//! Zeppelin REST client for interpreter settings.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{HttpReply, InterpreterApi};

const INTERPRETER_SETTING_PATH: &str = "/api/interpreter/setting";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `InterpreterApi` backed by `ureq`.
///
/// Redirects are not followed, so a 3xx reaches the caller as a failure status.
pub struct UreqInterpreterClient {
    agent: ureq::Agent,
}

impl UreqInterpreterClient {
    #[must_use]
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .redirects(0)
            .timeout(REQUEST_TIMEOUT)
            .build();
        Self { agent }
    }
}

impl Default for UreqInterpreterClient {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn setting_url(zeppelin_url: &str) -> String {
    format!(
        "{}{INTERPRETER_SETTING_PATH}",
        zeppelin_url.trim_end_matches('/')
    )
}

impl InterpreterApi for UreqInterpreterClient {
    async fn create_setting(&self, zeppelin_url: &str, body: Vec<u8>) -> Result<HttpReply> {
        let agent = self.agent.clone();
        let url = setting_url(zeppelin_url);
        tokio::task::spawn_blocking(move || post_json(&agent, &url, &body))
            .await
            .context("interpreter request task panicked")?
    }
}

fn post_json(agent: &ureq::Agent, url: &str, body: &[u8]) -> Result<HttpReply> {
    tracing::debug!(url, "POST interpreter setting");
    let response = match agent
        .post(url)
        .set("Content-Type", "application/json")
        .send_bytes(body)
    {
        Ok(r) | Err(ureq::Error::Status(_, r)) => r,
        Err(e) => return Err(anyhow::Error::new(e).context(format!("POST {url}"))),
    };
    let status = response.status();
    let body = response.into_string().unwrap_or_default();
    Ok(HttpReply { status, body })
}
