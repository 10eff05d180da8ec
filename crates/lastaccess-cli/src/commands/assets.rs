//! Assets command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use lastaccess_core::format::{format_bytes, format_dimensions, format_timestamp};
use lastaccess_core::{Accumulator, Asset, Report, ReportId};

use super::{PagingArgs, RelayArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct AssetsArgs {
    /// Report ID
    pub id: String,

    #[command(flatten)]
    pub relay: RelayArgs,

    #[command(flatten)]
    pub paging: PagingArgs,

    /// Print the assets as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AssetsArgs) -> Result<()> {
    let id = ReportId::new(&args.id).context("Invalid report ID")?;
    let client = args.relay.client()?;
    let source = client.assets(id.clone());

    let mut list = Accumulator::new();
    list.attach(id.as_str(), &source).await;
    if let Some(err) = list.error() {
        if let Some(report) = source.metadata() {
            print_metadata(&report);
        }
        bail!("Error loading report details: {err}");
    }

    args.paging.fetch_more(&mut list, &source).await;

    if args.json {
        output::json_pretty(&list.items())?;
    } else {
        if let Some(report) = source.metadata() {
            print_metadata(&report);
            println!();
        }
        print_assets(list.items());
    }

    if let Some(err) = list.error() {
        bail!("Error loading more assets: {err}");
    }

    if let Some(cursor) = list.cursor() {
        eprintln!();
        output::note("More assets available; use --pages or --all to load them.");
        eprintln!("{}: {}", "Next cursor".dimmed(), cursor);
    }

    Ok(())
}

fn print_metadata(report: &Report) {
    output::field("Report", report.id.as_str());
    output::field(
        "Status",
        &output::status(&report.status, report.status.as_str()).to_string(),
    );
    output::field("Created", &format_timestamp(&report.created_at));
    output::field("Total resources", &report.total_resources.to_string());
}

fn print_assets(assets: &[Asset]) {
    if assets.is_empty() {
        output::note("No assets found in this report.");
        return;
    }

    let rows: Vec<[String; 7]> = assets
        .iter()
        .map(|asset| {
            [
                asset.secure_url.clone(),
                format!("{}/{}", asset.resource_type, asset.delivery_type),
                asset.format.clone(),
                format_bytes(asset.bytes),
                format_dimensions(asset.width, asset.height),
                asset
                    .last_access
                    .as_ref()
                    .map(format_timestamp)
                    .unwrap_or_else(|| output::NOT_AVAILABLE.to_string()),
                format_timestamp(&asset.created_at),
            ]
        })
        .collect();

    output::table(
        [
            "URL",
            "Type",
            "Format",
            "Size",
            "Dimensions",
            "Last Access",
            "Created",
        ],
        &rows,
        |_, _, cell| cell,
    );
}
