//! lastaccess-relay - HTTP relay for the report dashboard.
//!
//! The relay accepts dashboard requests, signs them with the account
//! credentials held by the [`ReportApi`](lastaccess_core::ReportApi)
//! implementation, forwards them upstream and relays the answer. Three
//! routes are exposed:
//!
//! - `POST /generate-report` forwards a report generation request.
//! - `GET /reports` lists generated reports, optionally dropping those past
//!   the retention window.
//! - `GET /reports/:id/assets` checks the report's age, then lists its
//!   assets with the report metadata alongside.
//!
//! Failures are returned as JSON envelopes; see [`RelayError`].

mod error;
mod routes;
mod settings;

pub use error::{ErrorEnvelope, RelayError};
pub use routes::{AppState, router};
pub use settings::{DEFAULT_ASSET_PAGE_SIZE, DEFAULT_REPORTS_PAGE_SIZE, RelaySettings};

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "relay listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
