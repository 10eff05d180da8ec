//! Core traits for the upstream API and paged sources.

mod page_source;
mod report_api;

pub use page_source::PageSource;
pub use report_api::ReportApi;
