//! Domain types for tool configuration and the resolved per-run settings.
//!
//! Pure functions only; no I/O.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::LifecycleError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_ZEPPELIN_URL: &str = "http://localhost:8080";
pub const DEFAULT_PROCESS_TIMEOUT_SECS: u64 = 90;

const DEFAULT_VERSION: &str = "0.9.0";
const DEFAULT_INSTALL_TYPE: &str = "netinst";
const DEFAULT_MIRROR_BASE: &str = "http://apache.cs.utah.edu/zeppelin";
const DEFAULT_PLUGIN_NAME: &str = "solr";
const DEFAULT_PLUGIN_ARTIFACT: &str = "com.lucidworks.zeppelin:zeppelin-solr:0.1.6";

// ── Config file schema ───────────────────────────────────────────────────────

/// Optional YAML configuration file. Every key has a built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub release: ReleaseSpec,
    pub plugin: PluginSpec,
    pub process: ProcessConfig,
    pub liveness: LivenessConfig,
    pub readiness: ReadinessConfig,
}

/// Which Zeppelin distribution to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseSpec {
    pub version: String,
    pub install_type: String,
    pub mirror_base: String,
}

impl Default for ReleaseSpec {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            install_type: DEFAULT_INSTALL_TYPE.to_string(),
            mirror_base: DEFAULT_MIRROR_BASE.to_string(),
        }
    }
}

impl ReleaseSpec {
    /// Distribution name, e.g. `zeppelin-0.9.0-bin-netinst`.
    #[must_use]
    pub fn dist_name(&self) -> String {
        format!("zeppelin-{}-bin-{}", self.version, self.install_type)
    }
}

/// The interpreter plugin installed during bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginSpec {
    pub name: String,
    /// Maven coordinates passed to `install-interpreter --artifact`.
    pub artifact: String,
}

impl Default for PluginSpec {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLUGIN_NAME.to_string(),
            artifact: DEFAULT_PLUGIN_ARTIFACT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessConfig {
    pub timeout_secs: u64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_PROCESS_TIMEOUT_SECS,
        }
    }
}

/// How "is the daemon running?" is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LivenessKind {
    /// Probe the Zeppelin REST API.
    #[default]
    Http,
    /// Always report "not running".
    AssumeStopped,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LivenessConfig {
    pub probe: LivenessKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadinessConfig {
    pub timeout_secs: u64,
    pub interval_secs: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            interval_secs: 2,
        }
    }
}

// ── Resolved settings ────────────────────────────────────────────────────────

/// Values supplied by the command line (already merged with env vars by clap).
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub install_root: PathBuf,
    pub zeppelin_url: String,
    pub solr_url: String,
    pub timeout_secs: Option<u64>,
    pub await_ready: bool,
}

/// Bounded polling used by `bootstrap --await-ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

/// Everything one invocation needs, built once in the entrypoint.
#[derive(Debug, Clone)]
pub struct Settings {
    pub install_root: PathBuf,
    pub zeppelin_url: String,
    pub solr_url: String,
    pub release: ReleaseSpec,
    pub plugin: PluginSpec,
    pub process_timeout: Duration,
    pub liveness: LivenessKind,
    pub readiness: ReadinessPolicy,
    pub await_ready: bool,
}

impl ToolConfig {
    /// Reject values that would make the tool misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidConfig`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> {
            Err(LifecycleError::InvalidConfig(msg.to_string()).into())
        };
        if self.release.version.trim().is_empty() {
            return invalid("release.version must not be empty");
        }
        if self.release.install_type.trim().is_empty() {
            return invalid("release.install_type must not be empty");
        }
        if self.release.mirror_base.trim().is_empty() {
            return invalid("release.mirror_base must not be empty");
        }
        if self.plugin.name.trim().is_empty() || self.plugin.artifact.trim().is_empty() {
            return invalid("plugin.name and plugin.artifact must not be empty");
        }
        if self.process.timeout_secs == 0 {
            return invalid("process.timeout_secs must be greater than 0");
        }
        if self.readiness.timeout_secs == 0 || self.readiness.interval_secs == 0 {
            return invalid("readiness.timeout_secs and readiness.interval_secs must be greater than 0");
        }
        Ok(())
    }

    /// Merge command-line inputs over this config. Command-line values win.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged configuration is invalid.
    pub fn into_settings(mut self, inputs: RunInputs) -> Result<Settings> {
        if let Some(secs) = inputs.timeout_secs {
            self.process.timeout_secs = secs;
        }
        self.validate()?;
        if inputs.await_ready && self.liveness.probe == LivenessKind::AssumeStopped {
            return Err(LifecycleError::InvalidConfig(
                "--await-ready needs liveness.probe: http; assume-stopped never reports ready"
                    .to_string(),
            )
            .into());
        }
        Ok(Settings {
            install_root: inputs.install_root,
            zeppelin_url: inputs.zeppelin_url,
            solr_url: inputs.solr_url,
            release: self.release,
            plugin: self.plugin,
            process_timeout: Duration::from_secs(self.process.timeout_secs),
            liveness: self.liveness.probe,
            readiness: ReadinessPolicy {
                timeout: Duration::from_secs(self.readiness.timeout_secs),
                interval: Duration::from_secs(self.readiness.interval_secs),
            },
            await_ready: inputs.await_ready,
        })
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
