//! Report, asset and paging types.
//!
//! These mirror the JSON documents exchanged with the upstream API and the
//! relay. Upstream owns every record; nothing here is mutated after
//! decoding.

mod page;
mod request;
mod types;

pub use page::{AssetsPage, Page, ReportAssetsPage, ReportsPage};
pub use request::{
    DEFAULT_SORT_BY, DEFAULT_SORT_ORDER, GenerateReportRequest, MAX_EXCLUDED_FOLDERS, PageQuery,
    RESOURCE_TYPES, parse_folder_list,
};
pub use types::{Asset, Report, ReportParams, ReportStatus};
