//! Relay routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{debug, instrument};

use lastaccess_core::{PageQuery, ReportApi, ReportAssetsPage, ReportId, ReportsPage};

use crate::error::RelayError;
use crate::settings::RelaySettings;

/// Context attached to failed generate and list calls.
const API_REQUEST_FAILED: &str = "Cloudinary API request failed";

/// Context attached to a failed report metadata lookup.
const METADATA_FAILED: &str = "Failed to fetch report metadata";

/// Context attached to a failed asset listing.
const ASSETS_FAILED: &str = "Failed to fetch report assets";

/// Shared state handed to every route.
///
/// Both fields are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    api: Arc<dyn ReportApi>,
    settings: Arc<RelaySettings>,
}

impl AppState {
    pub fn new(api: Arc<dyn ReportApi>, settings: RelaySettings) -> Self {
        Self {
            api,
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }
}

/// Build the relay router.
pub fn router(api: Arc<dyn ReportApi>, settings: RelaySettings) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate-report", post(generate_report))
        .route("/reports", get(list_reports))
        .route("/reports/:id/assets", get(report_assets))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(api, settings))
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Forwards the body as received. Fields are not checked here; upstream
/// answers for them.
#[instrument(skip_all)]
async fn generate_report(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, RelayError> {
    let Json(request) = body.map_err(|rejection| RelayError::internal(rejection.body_text()))?;

    debug!("forwarding report request");

    let response = state
        .api
        .generate_report(&request)
        .await
        .map_err(|err| RelayError::from_api(err, API_REQUEST_FAILED, None))?;

    Ok(Json(response))
}

/// Query string accepted by the report listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListReportsParams {
    pub max_results: Option<String>,
    pub next_cursor: Option<String>,
}

#[instrument(skip_all, fields(cursor = params.next_cursor.is_some()))]
async fn list_reports(
    State(state): State<AppState>,
    Query(params): Query<ListReportsParams>,
) -> Result<Json<ReportsPage>, RelayError> {
    let settings = state.settings();
    let max_results = params
        .max_results
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(settings.reports_page_size.as_str());
    let query = PageQuery::new(max_results, params.next_cursor.as_deref());

    let mut page = state
        .api
        .list_reports(&query)
        .await
        .map_err(|err| RelayError::from_api(err, API_REQUEST_FAILED, None))?;

    if settings.recent_reports_only {
        let received = page.reports.len();
        settings.retention.retain_recent(&mut page.reports, Utc::now());
        debug!(
            dropped = received - page.reports.len(),
            "filtered reports past retention"
        );
    }

    Ok(Json(page))
}

/// Query string accepted by the asset listing.
///
/// `max_results` is accepted for compatibility and ignored; the relay's
/// configured asset page size applies.
#[derive(Debug, Default, Deserialize)]
pub struct AssetsParams {
    pub max_results: Option<String>,
    pub next_cursor: Option<String>,
}

#[instrument(skip_all, fields(report = %id))]
async fn report_assets(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<AssetsParams>,
) -> Result<Json<ReportAssetsPage>, RelayError> {
    let id = ReportId::new(id).map_err(|err| RelayError::from_api(err, METADATA_FAILED, None))?;
    let settings = state.settings();

    if let Some(requested) = params.max_results.as_deref() {
        debug!(requested, "ignoring client page size for assets");
    }

    let metadata = state
        .api
        .get_report(&id)
        .await
        .map_err(|err| RelayError::from_api(err, METADATA_FAILED, None))?;

    if settings.retention.is_expired(metadata.created_at, Utc::now()) {
        return Err(RelayError::ReportTooOld {
            message: format!(
                "This report is older than {} months and its assets may no longer be available",
                settings.retention.months()
            ),
            metadata: Box::new(metadata),
        });
    }

    let page_size = settings.asset_page_size.to_string();
    let query = PageQuery::new(&page_size, params.next_cursor.as_deref());

    match state.api.list_report_assets(&id, &query).await {
        Ok(assets) => Ok(Json(ReportAssetsPage { assets, metadata })),
        Err(err) => Err(RelayError::from_api(err, ASSETS_FAILED, Some(metadata))),
    }
}
