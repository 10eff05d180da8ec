//! lastaccess-core - Core types and traits for the last-access report dashboard.
//!
//! The dashboard relays report requests to an upstream media API and pages
//! through the results. This crate holds the pieces shared by the relay and
//! its clients: the report and asset model, the [`ReportApi`] seam used by
//! the relay, and the [`Accumulator`] that grows a list one page at a time.

pub mod accumulator;
pub mod error;
pub mod format;
pub mod report;
pub mod retention;
pub mod traits;
pub mod types;

pub use accumulator::{Accumulator, PageRequest};
pub use error::Error;
pub use report::{
    Asset, AssetsPage, GenerateReportRequest, Page, PageQuery, Report, ReportAssetsPage,
    ReportParams, ReportStatus, ReportsPage,
};
pub use retention::RetentionWindow;
pub use traits::{PageSource, ReportApi};
pub use types::{ApiBaseUrl, Credentials, ReportId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
