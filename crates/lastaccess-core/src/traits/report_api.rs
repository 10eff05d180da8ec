//! Upstream report API trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::report::{AssetsPage, PageQuery, Report, ReportsPage};
use crate::types::ReportId;

/// The external report-generation and asset-listing API.
///
/// Implementations sign every call with the account credentials and turn
/// non-success responses into [`crate::Error::Upstream`]. Nothing is
/// retried.
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Request a new report.
    ///
    /// `request` is sent as the JSON body without interpretation; callers
    /// building one locally serialize a
    /// [`GenerateReportRequest`](crate::GenerateReportRequest). The upstream
    /// response body is returned as-is.
    async fn generate_report(&self, request: &Value) -> Result<Value>;

    /// List previously generated reports.
    async fn list_reports(&self, query: &PageQuery<'_>) -> Result<ReportsPage>;

    /// Fetch one report's metadata.
    async fn get_report(&self, id: &ReportId) -> Result<Report>;

    /// List the assets covered by a report.
    async fn list_report_assets(&self, id: &ReportId, query: &PageQuery<'_>)
    -> Result<AssetsPage>;
}
