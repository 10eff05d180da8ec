//! HTTP-backed report API.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use lastaccess_core::report::{AssetsPage, PageQuery, Report, ReportsPage};
use lastaccess_core::traits::ReportApi;
use lastaccess_core::{ApiBaseUrl, Credentials, ReportId, Result};

use crate::client::ApiClient;
use crate::endpoints::{LAST_ACCESS_REPORT_ASSETS, LAST_ACCESS_REPORTS};

/// A network-backed [`ReportApi`] talking to the upstream Admin API.
#[derive(Debug, Clone)]
pub struct HttpReportApi {
    client: ApiClient,
}

impl HttpReportApi {
    /// Create a new API client for the given base URL and account.
    pub fn new(base: ApiBaseUrl, credentials: Credentials) -> Self {
        Self {
            client: ApiClient::new(base, credentials),
        }
    }

    /// Returns the API base URL.
    pub fn base(&self) -> &ApiBaseUrl {
        self.client.base()
    }
}

#[async_trait]
impl ReportApi for HttpReportApi {
    #[instrument(skip(self, request))]
    async fn generate_report(&self, request: &Value) -> Result<Value> {
        debug!(
            from = ?request.get("from_date"),
            to = ?request.get("to_date"),
            "Requesting report generation"
        );
        self.client.post(LAST_ACCESS_REPORTS, request).await
    }

    #[instrument(skip(self))]
    async fn list_reports(&self, query: &PageQuery<'_>) -> Result<ReportsPage> {
        debug!("Listing reports");
        self.client
            .get_with_query(LAST_ACCESS_REPORTS, query)
            .await
    }

    #[instrument(skip(self), fields(%id))]
    async fn get_report(&self, id: &ReportId) -> Result<Report> {
        debug!("Fetching report metadata");
        let segments = [LAST_ACCESS_REPORTS, &[id.as_str()]].concat();
        self.client.get(&segments).await
    }

    #[instrument(skip(self), fields(%id))]
    async fn list_report_assets(
        &self,
        id: &ReportId,
        query: &PageQuery<'_>,
    ) -> Result<AssetsPage> {
        debug!("Listing report assets");
        let segments = [LAST_ACCESS_REPORT_ASSETS, &[id.as_str()]].concat();
        self.client.get_with_query(&segments, query).await
    }
}
