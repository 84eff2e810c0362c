//! Wait for a freshly (re)started daemon to answer.

use anyhow::Result;

use crate::application::ports::LivenessProbe;
use crate::domain::{LifecycleError, ReadinessPolicy};

/// Poll `probe` every `policy.interval` until it reports running.
///
/// # Errors
///
/// Returns [`LifecycleError::ReadinessTimeout`] once `policy.timeout` elapses.
pub async fn wait_until_ready(probe: &impl LivenessProbe, policy: ReadinessPolicy) -> Result<()> {
    let deadline = tokio::time::Instant::now() + policy.timeout;
    loop {
        if probe.is_running().await {
            return Ok(());
        }
        if tokio::time::Instant::now() + policy.interval > deadline {
            return Err(LifecycleError::ReadinessTimeout {
                secs: policy.timeout.as_secs(),
            }
            .into());
        }
        tracing::debug!("zeppelin not ready yet");
        tokio::time::sleep(policy.interval).await;
    }
}
