//! Generate command implementation.

use anyhow::{Context, Result};
use clap::Args;
use clap::builder::PossibleValuesParser;
use tracing::debug;

use lastaccess_core::report::{
    DEFAULT_SORT_BY, DEFAULT_SORT_ORDER, RESOURCE_TYPES, parse_folder_list,
};
use lastaccess_core::GenerateReportRequest;

use super::RelayArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub relay: RelayArgs,

    /// First day covered by the report (YYYY-MM-DD)
    #[arg(long)]
    pub from: String,

    /// Last day covered by the report (YYYY-MM-DD)
    #[arg(long)]
    pub to: String,

    /// Restrict the report to one resource type (default: all types)
    #[arg(long, value_parser = PossibleValuesParser::new(RESOURCE_TYPES))]
    pub resource_type: Option<String>,

    /// Comma-separated folders to leave out, e.g. "docs, website"
    #[arg(long)]
    pub exclude_folders: Option<String>,

    /// Field to sort the report by
    #[arg(long, default_value = DEFAULT_SORT_BY)]
    pub sort_by: String,

    /// Sort direction
    #[arg(long, default_value = DEFAULT_SORT_ORDER, value_parser = ["asc", "desc"])]
    pub sort_order: String,
}

impl GenerateArgs {
    fn request(&self) -> Result<GenerateReportRequest> {
        let folders = match self.exclude_folders.as_deref() {
            Some(list) => parse_folder_list(list).context("Invalid folder list")?,
            None => Vec::new(),
        };

        let mut request = GenerateReportRequest::new(&self.from, &self.to);
        request.resource_type = self.resource_type.clone();
        request.exclude_folders = Some(folders);
        request.sort_by = Some(self.sort_by.clone());
        request.sort_order = Some(self.sort_order.clone());
        Ok(request)
    }
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let request = args.request()?;
    debug!(?request, "generating report");

    let client = args.relay.client()?;
    let response = client
        .generate_report(&request)
        .await
        .context("Failed to generate report")?;

    output::success("Report generation requested");
    output::json_pretty(&response)?;

    Ok(())
}
