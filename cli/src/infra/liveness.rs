//! Liveness probes for the Zeppelin daemon.

use std::time::Duration;

use crate::application::ports::LivenessProbe;
use crate::domain::LivenessKind;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Always reports "not running". Stop and clean never invoke the daemon.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeStopped;

impl LivenessProbe for AssumeStopped {
    async fn is_running(&self) -> bool {
        false
    }
}

/// Running means `GET {zeppelin_url}/api/version` answers with a 2xx.
pub struct HttpLiveness {
    agent: ureq::Agent,
    url: String,
}

impl HttpLiveness {
    #[must_use]
    pub fn new(zeppelin_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .redirects(0)
            .timeout(PROBE_TIMEOUT)
            .build();
        Self {
            agent,
            url: format!("{}/api/version", zeppelin_url.trim_end_matches('/')),
        }
    }
}

impl LivenessProbe for HttpLiveness {
    async fn is_running(&self) -> bool {
        let agent = self.agent.clone();
        let url = self.url.clone();
        let answered = tokio::task::spawn_blocking(move || match agent.get(&url).call() {
            Ok(r) => (200..300).contains(&r.status()),
            Err(e) => {
                tracing::debug!(url, error = %e, "liveness probe failed");
                false
            }
        })
        .await;
        answered.unwrap_or(false)
    }
}

/// Either probe, picked from configuration.
pub enum Liveness {
    Http(HttpLiveness),
    AssumeStopped(AssumeStopped),
}

impl Liveness {
    #[must_use]
    pub fn from_kind(kind: LivenessKind, zeppelin_url: &str) -> Self {
        match kind {
            LivenessKind::Http => Self::Http(HttpLiveness::new(zeppelin_url)),
            LivenessKind::AssumeStopped => Self::AssumeStopped(AssumeStopped),
        }
    }
}

impl LivenessProbe for Liveness {
    async fn is_running(&self) -> bool {
        match self {
            Self::Http(p) => p.is_running().await,
            Self::AssumeStopped(p) => p.is_running().await,
        }
    }
}
