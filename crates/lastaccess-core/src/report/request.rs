//! Outbound request shapes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// Upper bound on folders excluded from one report.
pub const MAX_EXCLUDED_FOLDERS: usize = 50;

/// Resource types a report can be restricted to.
pub const RESOURCE_TYPES: [&str; 3] = ["image", "video", "raw"];

/// Sort field used when the caller does not pick one.
pub const DEFAULT_SORT_BY: &str = "accessed_at";

/// Sort direction used when the caller does not pick one.
pub const DEFAULT_SORT_ORDER: &str = "desc";

/// Body of a report generation request.
///
/// The relay forwards this verbatim; absent optional fields are left out of
/// the JSON body rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    pub from_date: String,
    pub to_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_folders: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl GenerateReportRequest {
    /// Create a request for a date range with no other filters.
    pub fn new(from_date: impl Into<String>, to_date: impl Into<String>) -> Self {
        Self {
            from_date: from_date.into(),
            to_date: to_date.into(),
            resource_type: None,
            exclude_folders: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

/// Split a comma-separated folder list as typed into a form.
///
/// Entries are trimmed and blanks dropped. More than
/// [`MAX_EXCLUDED_FOLDERS`] entries is rejected.
pub fn parse_folder_list(input: &str) -> Result<Vec<String>, Error> {
    let folders: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();

    if folders.len() > MAX_EXCLUDED_FOLDERS {
        return Err(InvalidInputError::TooManyFolders {
            max: MAX_EXCLUDED_FOLDERS,
            count: folders.len(),
        }
        .into());
    }

    Ok(folders)
}

/// Query string of a paged upstream call.
///
/// `max_results` is passed through as given; upstream decides what it
/// accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageQuery<'a> {
    pub max_results: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<&'a str>,
}

impl<'a> PageQuery<'a> {
    /// Build a query, treating an empty cursor as no cursor.
    pub fn new(max_results: &'a str, next_cursor: Option<&'a str>) -> Self {
        Self {
            max_results,
            next_cursor: next_cursor.filter(|c| !c.is_empty()),
        }
    }
}
