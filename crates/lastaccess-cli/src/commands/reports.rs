//! Reports command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use lastaccess_core::format::format_timestamp;
use lastaccess_core::{Accumulator, Report};
use lastaccess_relay::DEFAULT_REPORTS_PAGE_SIZE;

use super::{PagingArgs, RelayArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct ReportsArgs {
    #[command(flatten)]
    pub relay: RelayArgs,

    /// Reports per page
    #[arg(long, default_value = DEFAULT_REPORTS_PAGE_SIZE)]
    pub page_size: String,

    #[command(flatten)]
    pub paging: PagingArgs,

    /// Print the reports as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ReportsArgs) -> Result<()> {
    let client = args.relay.client()?;
    let source = client.reports(args.page_size.as_str());

    let mut list = Accumulator::new();
    list.reset_and_fetch_first_page(&source).await;
    if let Some(err) = list.error() {
        bail!("Error loading reports: {err}");
    }

    args.paging.fetch_more(&mut list, &source).await;

    if args.json {
        output::json_pretty(&list.items())?;
    } else {
        print_reports(list.items());
    }

    if let Some(err) = list.error() {
        bail!("Error loading more reports: {err}");
    }

    if let Some(cursor) = list.cursor() {
        eprintln!();
        output::note("More reports available; use --pages or --all to load them.");
        eprintln!("{}: {}", "Next cursor".dimmed(), cursor);
    }

    Ok(())
}

fn print_reports(reports: &[Report]) {
    if reports.is_empty() {
        output::note("No reports generated yet. Use `lastaccess generate` to generate your first report.");
        return;
    }

    let rows: Vec<[String; 7]> = reports
        .iter()
        .map(|report| {
            let params = &report.params;
            [
                report.id.to_string(),
                report.status.to_string(),
                output::or_na(params.resource_type.as_deref()).to_string(),
                report.total_resources.to_string(),
                output::or_na(params.from_date.as_deref()).to_string(),
                output::or_na(params.to_date.as_deref()).to_string(),
                format_timestamp(&report.created_at),
            ]
        })
        .collect();

    output::table(
        [
            "ID",
            "Status",
            "Resource Type",
            "Total Resources",
            "From Date",
            "To Date",
            "Created At",
        ],
        &rows,
        |row, column, cell| match column {
            1 => output::status(&reports[row].status, &cell).to_string(),
            _ => cell,
        },
    );
}
