//! Report and asset records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ReportId;

/// A generated last-access report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Upstream identifier.
    pub id: ReportId,

    /// Generation status.
    pub status: ReportStatus,

    /// When the report was requested.
    pub created_at: DateTime<Utc>,

    /// Parameters the report was generated with.
    #[serde(default)]
    pub params: ReportParams,

    /// Number of assets covered by the report.
    #[serde(default)]
    pub total_resources: u64,

    /// Fields not modelled above, kept so the record relays unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Generation status of a report.
///
/// Upstream defines the set of values; only `done` is given meaning here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportStatus(String);

impl ReportStatus {
    /// Wrap a raw status string.
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Returns the raw status string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true once the report has finished generating.
    pub fn is_done(&self) -> bool {
        self.0 == "done"
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The request parameters echoed back on a report.
///
/// Only the fields shown on the dashboard are modelled; the rest, such as
/// `exclude_folders` or `sort_by`, are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One stored media object listed by a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Public identifier, unique within resource type and delivery type.
    pub public_id: String,

    #[serde(default)]
    pub format: String,

    #[serde(default)]
    pub version: u64,

    /// `image`, `video` or `raw`.
    pub resource_type: String,

    /// Delivery type, e.g. `upload` or `private`.
    #[serde(rename = "type")]
    pub delivery_type: String,

    pub created_at: DateTime<Utc>,

    /// Last time the asset was delivered, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<DateTime<Utc>>,

    /// Size in bytes.
    #[serde(default)]
    pub bytes: u64,

    /// Width in pixels, 0 when not applicable.
    #[serde(default)]
    pub width: u32,

    /// Height in pixels, 0 when not applicable.
    #[serde(default)]
    pub height: u32,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub secure_url: String,

    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Asset {
    /// Returns true when the asset carries pixel dimensions.
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
