//! solr-zeppelin - bootstrap and manage a Zeppelin sandbox wired to Solr

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use solr_zeppelin::cli::Cli;
use solr_zeppelin::domain::error::{error_code, exit_code};
use solr_zeppelin::output::json;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SOLR_ZEPPELIN_LOG")
                .unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json_mode {
                match json::format_error(&format!("{e:#}"), error_code(&e)) {
                    Ok(out) => println!("{out}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::from(exit_code(&e))
        }
    }
}
