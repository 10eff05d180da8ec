//! Upstream endpoint paths, relative to `<base>/<cloud_name>`.

/// Report collection: POST to generate, GET to list, `/<id>` for metadata.
pub const LAST_ACCESS_REPORTS: &[&str] = &["resources_last_access_reports"];

/// Assets of one report, followed by the report id.
pub const LAST_ACCESS_REPORT_ASSETS: &[&str] = &["resources", "last_access_report"];
