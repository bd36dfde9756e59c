mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use estoque_core::{InventoryStore, MutationCoordinator};

use crate::cli::{Cli, Command};
use crate::commands::Presentation;
use crate::error::CliError;

/// Set to `json` for machine-readable log lines on stderr.
const LOG_FORMAT_ENV: &str = "ESTOQUE_LOG_FORMAT";

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need the inventory API
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "estoque", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the inventory API
        cmd => {
            let cfg = config::load_config()?;
            let inventory = config::resolve_inventory_config(&cli.global, &cfg)?;
            tracing::debug!(
                api_url = %inventory.base_url,
                timeout_secs = inventory.timeout.as_secs(),
                currency = %inventory.currency,
                "resolved inventory config"
            );

            let store = Arc::new(InventoryStore::from_config(&inventory)?);
            let coordinator = MutationCoordinator::new(store);
            let view = Presentation::resolve(&cli.global, &cfg.defaults);

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &coordinator, &view).await
        }
    }
}
