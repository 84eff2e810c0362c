//! Loads the optional YAML configuration file.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::{LifecycleError, ToolConfig};

/// Reads `ToolConfig` from YAML on disk.
///
/// An explicit path must exist. The default path
/// (`<config dir>/solr-zeppelin/config.yaml`) is used only when present.
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// The file that would be read, if any.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        if let Some(p) = &self.explicit {
            return Some(p.clone());
        }
        dirs::config_dir()
            .map(|d| d.join("solr-zeppelin").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Load the file, or built-in defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidConfig`] if the file is missing
    /// (explicit path only), unreadable, or not valid for the schema.
    pub fn load(&self) -> Result<ToolConfig> {
        match self.path() {
            Some(path) => read_config(&path),
            None => Ok(ToolConfig::default()),
        }
    }
}

fn read_config(path: &Path) -> Result<ToolConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LifecycleError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "loaded config file");
    if content.trim().is_empty() {
        return Ok(ToolConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|e| {
        LifecycleError::InvalidConfig(format!("cannot parse {}: {e}", path.display())).into()
    })
}
