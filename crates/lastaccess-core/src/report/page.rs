//! Paged collections.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{Asset, Report};

/// One page of a cursor-paginated collection.
///
/// A cursor means more items can be fetched; no cursor means the collection
/// is exhausted. A cursor is only meaningful with the query that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Create a page, treating an empty cursor as no cursor.
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            items,
            next_cursor: next_cursor.filter(|c| !c.is_empty()),
        }
    }

    /// Returns true if another page can be requested.
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// A page of reports, as returned by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportsPage {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub reports: Vec<Report>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// A page of assets belonging to one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetsPage {
    #[serde(default, deserialize_with = "skip_malformed")]
    pub resources: Vec<Asset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// A page of assets with the owning report's metadata alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportAssetsPage {
    #[serde(flatten)]
    pub assets: AssetsPage,

    pub metadata: Report,
}

/// Decode a list, dropping entries that do not fit `T`.
///
/// One malformed record costs that record, not the page.
fn skip_malformed<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let received = raw.len();

    let items: Vec<T> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(error = %err, "skipping malformed record");
                None
            }
        })
        .collect();

    if items.len() < received {
        warn!(received, kept = items.len(), "page had malformed records");
    }
    Ok(items)
}

impl From<ReportsPage> for Page<Report> {
    fn from(page: ReportsPage) -> Self {
        Page::new(page.reports, page.next_cursor)
    }
}

impl From<AssetsPage> for Page<Asset> {
    fn from(page: AssetsPage) -> Self {
        Page::new(page.resources, page.next_cursor)
    }
}

impl From<ReportAssetsPage> for Page<Asset> {
    fn from(page: ReportAssetsPage) -> Self {
        page.assets.into()
    }
}
