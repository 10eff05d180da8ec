//! Serve command implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use lastaccess_core::retention::{DEFAULT_RETENTION_MONTHS, MAX_RETENTION_MONTHS};
use lastaccess_core::{ApiBaseUrl, Credentials, RetentionWindow};
use lastaccess_http::HttpReportApi;
use lastaccess_relay::{DEFAULT_ASSET_PAGE_SIZE, DEFAULT_REPORTS_PAGE_SIZE, RelaySettings};

use crate::output;

#[derive(Args, Debug)]
pub struct ServeArgs {
    // Credentials are not checked at startup. Missing ones surface as the
    // upstream's authentication failure on each relayed call.
    /// Upstream account (cloud) name
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME", default_value = "")]
    pub cloud_name: String,

    /// Upstream API key
    #[arg(long, env = "CLOUDINARY_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Upstream API secret
    #[arg(long, env = "CLOUDINARY_API_SECRET", default_value = "", hide_env_values = true)]
    pub api_secret: String,

    /// Upstream API base URL
    #[arg(long, env = "LASTACCESS_API_BASE", default_value_t = ApiBaseUrl::default())]
    pub api_base: ApiBaseUrl,

    /// Address to listen on
    #[arg(long, env = "LASTACCESS_BIND", default_value = "127.0.0.1:8787")]
    pub bind: SocketAddr,

    /// Hide reports past the retention window from listings
    #[arg(long, env = "LASTACCESS_RECENT_ONLY")]
    pub recent_only: bool,

    /// Age in months after which report assets are no longer served
    #[arg(
        long,
        env = "LASTACCESS_RETENTION_MONTHS",
        default_value_t = DEFAULT_RETENTION_MONTHS,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_RETENTION_MONTHS))
    )]
    pub retention_months: u32,

    /// Page size for asset listings
    #[arg(long, env = "LASTACCESS_ASSET_PAGE_SIZE", default_value_t = DEFAULT_ASSET_PAGE_SIZE)]
    pub asset_page_size: u32,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let credentials = Credentials::new(args.cloud_name, args.api_key, args.api_secret);
    let api = HttpReportApi::new(args.api_base, credentials);

    let settings = RelaySettings {
        reports_page_size: DEFAULT_REPORTS_PAGE_SIZE.to_string(),
        asset_page_size: args.asset_page_size,
        recent_reports_only: args.recent_only,
        retention: RetentionWindow::new(args.retention_months),
    };
    info!(?settings, upstream = %api.base(), "starting relay");

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    output::success(&format!("Relay listening on http://{addr}"));

    let router = lastaccess_relay::router(Arc::new(api), settings);
    lastaccess_relay::serve(listener, router, shutdown_signal())
        .await
        .context("Relay stopped unexpectedly")?;

    info!("relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
