//! Pagewise CLI - Page-level document intelligence from the command line.

use anyhow::Context;
use clap::Parser;
use pagewise_cli::commands;
use pagewise_cli::config::{self, OutputFormat};
use pagewise_cli::{Cli, CliError, Command, Formatter};
use pagewise_capability::ProviderConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter = Formatter::new(OutputFormat::from(cli.format), !cli.no_color);

    if let Err(e) = run(cli, &formatter).await {
        let report = formatter.format_failure(&format!("{:#}", e), e.downcast_ref::<CliError>());
        // JSON callers read the envelope from stdout.
        if formatter.is_json() {
            println!("{}", report);
        } else {
            eprintln!("{}", report);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, formatter: &Formatter) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Classify(args) => {
            commands::execute_classify(args, load_config(config_path)?, formatter).await?;
        }
        Command::Extract(args) => {
            commands::execute_extract(args, load_config(config_path)?, formatter).await?;
        }
        Command::Summarize(args) => {
            commands::execute_summarize(args, load_config(config_path)?, formatter).await?;
        }
        Command::Config(args) => {
            commands::execute_config(args, config_path, formatter)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ProviderConfig> {
    config::load(path).context("Failed to load configuration")
}

// Logs go to stderr so stdout stays parseable with --format json.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
