//! Subcommand implementations.

pub mod assets;
pub mod generate;
pub mod reports;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;
use reqwest::Url;

use lastaccess_core::{Accumulator, PageSource};

use crate::cli::Commands;
use crate::relay_client::RelayClient;

/// Where the dashboard commands find the relay.
#[derive(Args, Debug)]
pub struct RelayArgs {
    /// Relay base URL
    #[arg(long, env = "LASTACCESS_RELAY", default_value = "http://127.0.0.1:8787")]
    pub relay: Url,
}

impl RelayArgs {
    pub fn client(&self) -> Result<RelayClient> {
        RelayClient::new(self.relay.clone()).context("Invalid relay URL")
    }
}

/// How many pages a listing command fetches.
#[derive(Args, Debug)]
pub struct PagingArgs {
    /// Number of pages to fetch
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Fetch every page
    #[arg(long, conflicts_with = "pages")]
    pub all: bool,
}

impl PagingArgs {
    /// Load the pages after the first one, stopping at the first failure.
    pub async fn fetch_more<S>(&self, list: &mut Accumulator<S::Item>, source: &S)
    where
        S: PageSource,
    {
        if self.all {
            list.fetch_remaining(source).await;
            return;
        }

        for _ in 1..self.pages {
            if !list.fetch_next_page(source).await || list.error().is_some() {
                break;
            }
        }
    }
}

pub async fn handle(command: Commands) -> Result<()> {
    match command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Reports(args) => reports::run(args).await,
        Commands::Assets(args) => assets::run(args).await,
        Commands::Generate(args) => generate::run(args).await,
    }
}
