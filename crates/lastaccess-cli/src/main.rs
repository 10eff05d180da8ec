//! lastaccess - relay server and terminal dashboard for last-access reports.
//!
//! The binary plays both halves of the dashboard:
//!
//! - `serve` holds the upstream account credentials and runs the HTTP relay
//!   from `lastaccess-relay`. Nothing else ever talks to upstream directly.
//! - `reports`, `assets` and `generate` are clients of a running relay,
//!   located by `--relay` or `LASTACCESS_RELAY`. They page through listings
//!   with the core `Accumulator` and print tables to stdout.
//!
//! Logs always go to stderr so they never mix with table or JSON output.

mod cli;
mod commands;
mod output;
mod relay_client;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);
    commands::handle(cli.command).await
}

/// Install the subscriber. `RUST_LOG` wins over `-v` when set.
fn init_logging(verbosity: u8, json: bool) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let layer = fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.with_target(false)).init();
    }
}
