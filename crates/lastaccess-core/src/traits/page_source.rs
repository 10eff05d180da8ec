//! Paged source trait.

use async_trait::async_trait;

use crate::Result;
use crate::report::Page;

/// Something that serves a collection one page at a time.
///
/// Each call returns the page following `cursor`, or the first page when
/// `cursor` is `None`.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type of each page.
    type Item: Send;

    /// Fetch the page that follows `cursor`.
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<Self::Item>>;
}
