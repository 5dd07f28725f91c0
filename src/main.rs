// src/main.rs

use anyhow::Result;
use clap::Parser;
use pacrat::cli::{Cli, Operation, RunConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    let Some(cfg) = RunConfig::from_cli(cli) else {
        // No operation requested, mirror the help hint and do nothing else.
        println!("pacrat v{}", env!("CARGO_PKG_VERSION"));
        println!("Run 'pacrat --help' for usage information");
        return Ok(());
    };

    match cfg.operation {
        Operation::List => pacrat::commands::cmd_list(&cfg),
        Operation::Pull => pacrat::commands::cmd_pull(&cfg),
    }
}

/// Diagnostics go to stderr so list output stays clean on stdout
fn init_tracing(verbose: bool, debug: bool) {
    let default = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
