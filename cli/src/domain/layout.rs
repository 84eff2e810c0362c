//! Install layout: every filesystem location derived from one install root.
//!
//! Pure functions only; no I/O, no existence checks.

use std::path::{Path, PathBuf};

use crate::domain::config::ReleaseSpec;

/// Directory (under the install root) that holds the whole sandbox.
pub const BASE_DIR_NAME: &str = "zeppelin";

/// Unpack output captured while `tar` runs; kept only when unpacking fails.
pub const UNPACK_LOG_NAME: &str = "logs.txt";

const INTERPRETER_TEMPLATE_NAME: &str = "zeppelin-solr-interpreter.json.template";
const INTERPRETER_OUTPUT_NAME: &str = "zeppelin-solr-interpreter.json";

/// Host script flavour; decides the extension of the daemon and installer scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// POSIX shell scripts (`.sh`).
    Posix,
    /// Windows command scripts (`.cmd`).
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    fn script_extension(self) -> &'static str {
        match self {
            Self::Posix => "sh",
            Self::Windows => "cmd",
        }
    }
}

/// Fixed set of paths for one Zeppelin sandbox.
///
/// Two layouts built from the same root, release and platform are always equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// `{root}/zeppelin`
    pub base_dir: PathBuf,
    /// Downloaded tarball inside `base_dir`.
    pub archive_path: PathBuf,
    /// Mirror URL the tarball is fetched from.
    pub archive_url: String,
    /// Directory the tarball unpacks into.
    pub unpacked_dir: PathBuf,
    /// `bin/zeppelin-daemon.{sh,cmd}`
    pub daemon_path: PathBuf,
    /// `bin/install-interpreter.{sh,cmd}`
    pub interpreter_installer_path: PathBuf,
    /// Interpreter setting template shipped with Solr.
    pub interpreter_template_path: PathBuf,
    /// Rendered interpreter setting; removed after each publish.
    pub interpreter_output_path: PathBuf,
    /// `tar` output log.
    pub unpack_log_path: PathBuf,
}

impl InstallLayout {
    /// Compute the layout for `root`.
    #[must_use]
    pub fn new(root: &Path, release: &ReleaseSpec, platform: Platform) -> Self {
        let base_dir = root.join(BASE_DIR_NAME);
        let dist_name = release.dist_name();
        let archive_name = format!("{dist_name}.tgz");
        let unpacked_dir = base_dir.join(&dist_name);
        let bin_dir = unpacked_dir.join("bin");
        let ext = platform.script_extension();
        let resources = root.join("server").join("resources");

        Self {
            archive_url: format!(
                "{}/zeppelin-{}/{archive_name}",
                release.mirror_base.trim_end_matches('/'),
                release.version
            ),
            archive_path: base_dir.join(&archive_name),
            daemon_path: bin_dir.join(format!("zeppelin-daemon.{ext}")),
            interpreter_installer_path: bin_dir.join(format!("install-interpreter.{ext}")),
            interpreter_template_path: resources.join(INTERPRETER_TEMPLATE_NAME),
            interpreter_output_path: resources.join(INTERPRETER_OUTPUT_NAME),
            unpack_log_path: base_dir.join(UNPACK_LOG_NAME),
            unpacked_dir,
            base_dir,
        }
    }
}
