//! Relay settings.

use lastaccess_core::RetentionWindow;

/// Page size sent upstream when the dashboard does not ask for one.
pub const DEFAULT_REPORTS_PAGE_SIZE: &str = "10";

/// Page size for asset listings.
pub const DEFAULT_ASSET_PAGE_SIZE: u32 = 100;

/// Knobs controlling how the relay pages and filters.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Fallback `max_results` for report listings. Passed through unparsed.
    pub reports_page_size: String,

    /// `max_results` for asset listings. The dashboard cannot override it.
    pub asset_page_size: u32,

    /// Drop reports past the retention window from each listed page.
    pub recent_reports_only: bool,

    /// Age limit for reports.
    pub retention: RetentionWindow,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            reports_page_size: DEFAULT_REPORTS_PAGE_SIZE.to_string(),
            asset_page_size: DEFAULT_ASSET_PAGE_SIZE,
            recent_reports_only: false,
            retention: RetentionWindow::default(),
        }
    }
}
