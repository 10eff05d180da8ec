//! HTTP client for a running relay.

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use lastaccess_core::error::{InvalidInputError, UpstreamError};
use lastaccess_core::{
    Asset, GenerateReportRequest, Page, PageQuery, PageSource, Report, ReportAssetsPage,
    ReportId, ReportsPage, Result,
};

/// Client for the relay's dashboard routes.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base: Url,
}

impl RelayClient {
    /// Create a client for the relay at `base`.
    pub fn new(base: Url) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: base.to_string(),
                reason: "relay URL must be hierarchical, e.g. http://127.0.0.1:8787".into(),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("lastaccess/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Ok(Self { client, base })
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Ask the relay to generate a report and return its answer verbatim.
    #[instrument(skip_all)]
    pub async fn generate_report(&self, request: &GenerateReportRequest) -> Result<Value> {
        let url = self.url(&["generate-report"]);
        debug!(%url, "POST");
        trace!(?request, "request body");

        let response = self.client.post(url).json(request).send().await?;
        handle_response(response).await
    }

    /// Report listing, `page_size` reports at a time.
    pub fn reports(&self, page_size: impl Into<String>) -> ReportsSource<'_> {
        ReportsSource {
            client: self,
            page_size: page_size.into(),
        }
    }

    /// Asset listing of one report.
    pub fn assets(&self, id: ReportId) -> AssetsSource<'_> {
        AssetsSource {
            client: self,
            id,
            metadata: Mutex::new(None),
        }
    }
}

async fn handle_response<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
    let status = response.status();
    trace!(status = %status, "response");

    if status.is_success() {
        Ok(response.json::<R>().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        let error = UpstreamError::from_body(status.as_u16(), &body);
        debug!(status = status.as_u16(), error = %error.summary(), "relay refused request");
        Err(error.into())
    }
}

/// Pages of generated reports.
pub struct ReportsSource<'a> {
    client: &'a RelayClient,
    page_size: String,
}

#[async_trait]
impl PageSource for ReportsSource<'_> {
    type Item = Report;

    #[instrument(skip(self))]
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<Report>> {
        let url = self.client.url(&["reports"]);
        debug!(%url, "GET");

        let query = PageQuery::new(&self.page_size, cursor);
        let response = self.client.client.get(url).query(&query).send().await?;
        let page: ReportsPage = handle_response(response).await?;
        Ok(page.into())
    }
}

/// Pages of one report's assets.
///
/// The relay sends the report metadata with every page, and with some
/// refusals; the latest copy is kept.
pub struct AssetsSource<'a> {
    client: &'a RelayClient,
    id: ReportId,
    metadata: Mutex<Option<Report>>,
}

impl AssetsSource<'_> {
    /// Report metadata from the most recent relay answer that carried it.
    pub fn metadata(&self) -> Option<Report> {
        self.metadata.lock().ok()?.clone()
    }

    fn remember(&self, report: Report) {
        if let Ok(mut metadata) = self.metadata.lock() {
            *metadata = Some(report);
        }
    }
}

#[async_trait]
impl PageSource for AssetsSource<'_> {
    type Item = Asset;

    #[instrument(skip(self), fields(report = %self.id))]
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<Asset>> {
        let url = self.client.url(&["reports", self.id.as_str(), "assets"]);
        debug!(%url, "GET");

        let mut request = self.client.client.get(url);
        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            request = request.query(&[("next_cursor", cursor)]);
        }

        let response = request.send().await?;
        match handle_response::<ReportAssetsPage>(response).await {
            Ok(page) => {
                self.remember(page.metadata);
                Ok(page.assets.into())
            }
            Err(err) => {
                if let Some(report) = err
                    .as_upstream()
                    .and_then(|u| serde_json::from_value(u.details["metadata"].clone()).ok())
                {
                    self.remember(report);
                }
                Err(err)
            }
        }
    }
}
