mod classify;
mod cli;
mod config;
mod digest;
mod feed;
mod gate;
mod glyphs;
mod model;
mod render;
mod store;

use std::{io, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli::run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr; stdout is reserved for the report.
///
/// `STANDUP_LOG` takes an `EnvFilter` directive; `--verbose` overrides it.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("standup=debug")
    } else {
        EnvFilter::try_from_env("STANDUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
