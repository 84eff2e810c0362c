//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::app::AppContext;
use crate::commands;
use crate::domain::config::DEFAULT_ZEPPELIN_URL;
use crate::domain::{LifecycleAction, RunInputs};
use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;

/// Bootstrap and manage a local Zeppelin sandbox wired to Solr
#[derive(Parser, Debug)]
#[command(name = "solr-zeppelin", version)]
pub struct Cli {
    /// Action to perform: bootstrap, clean, start, stop, update-interpreter
    #[arg(short, long, value_name = "ACTION")]
    pub action: String,

    /// Zeppelin base URL
    #[arg(short, long, env = "ZEPPELIN_URL", default_value = DEFAULT_ZEPPELIN_URL)]
    pub zeppelin_url: String,

    /// Solr base URL the interpreter should point at
    #[arg(short, long, env = "SOLR_URL")]
    pub solr_url: String,

    /// Solr installation directory; the sandbox lives in `<dir>/zeppelin`
    #[arg(long, env = "SOLR_INSTALL_DIR", value_name = "DIR")]
    pub install_dir: PathBuf,

    /// YAML configuration file
    #[arg(long, env = "SOLR_ZEPPELIN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// After bootstrap, wait for Zeppelin to answer and create the interpreter
    #[arg(long)]
    pub await_ready: bool,

    /// Seconds to wait for each external command
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output (also honoured via `NO_COLOR`)
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Execute the requested action.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is unknown, the configuration is
    /// invalid, or the action itself fails.
    pub async fn run(self) -> Result<()> {
        let action: LifecycleAction = self.action.parse()?;
        tracing::debug!(%action, "dispatching");

        let config = YamlConfigStore::new(self.config).load()?;
        let settings = config.into_settings(RunInputs {
            install_root: self.install_dir,
            zeppelin_url: self.zeppelin_url,
            solr_url: self.solr_url,
            timeout_secs: self.timeout,
            await_ready: self.await_ready,
        })?;

        let output = OutputContext::new(self.no_color, self.quiet, self.json);
        let app = AppContext::new(output, settings);

        match action {
            LifecycleAction::Bootstrap => commands::bootstrap::run(&app).await,
            LifecycleAction::Clean => commands::clean::run(&app).await,
            LifecycleAction::Start => commands::start::run(&app).await,
            LifecycleAction::Stop => commands::stop::run(&app).await,
            LifecycleAction::UpdateInterpreter => commands::update_interpreter::run(&app).await,
        }
    }
}
