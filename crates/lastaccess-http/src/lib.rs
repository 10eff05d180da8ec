//! lastaccess-http - HTTP client for the upstream report API.

mod api;
mod client;
mod endpoints;

pub use api::HttpReportApi;
