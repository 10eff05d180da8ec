//! Validated value types.
//!
//! These types check their invariants at construction time so the rest of
//! the crate can pass them around without re-validating.

mod api_url;
mod credentials;
mod report_id;

pub use api_url::{ApiBaseUrl, DEFAULT_API_BASE};
pub use credentials::Credentials;
pub use report_id::ReportId;
