//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{assets, generate, reports, serve};

/// Relay and dashboard for last-access reports.
#[derive(Parser, Debug)]
#[command(name = "lastaccess")]
#[command(author, version = env!("LASTACCESS_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the relay in front of the upstream report API
    Serve(serve::ServeArgs),

    /// List generated reports
    Reports(reports::ReportsArgs),

    /// List the assets of a report
    Assets(assets::AssetsArgs),

    /// Request a new report
    Generate(generate::GenerateArgs),
}
