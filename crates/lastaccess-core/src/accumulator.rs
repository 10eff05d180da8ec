//! Incremental cursor pagination.
//!
//! An [`Accumulator`] grows one list from successive pages of a
//! [`PageSource`]. Pages are appended in the order they arrive and never
//! merged or de-duplicated, so a source that hands out a stale cursor will
//! produce repeated items.
//!
//! The state machine is usable without any I/O: [`Accumulator::begin_next_page`]
//! hands out a [`PageRequest`] ticket and [`Accumulator::complete`] applies
//! the result. The async helpers drive a [`PageSource`] through the same
//! steps.
//!
//! ```
//! use lastaccess_core::{Accumulator, Page};
//!
//! let mut list = Accumulator::new();
//! let first = list.begin_first_page();
//! list.complete(first, Ok(Page::new(vec!["a", "b"], Some("c1".into()))));
//!
//! let next = list.begin_next_page().unwrap();
//! assert_eq!(next.cursor(), Some("c1"));
//! list.complete(next, Ok(Page::new(vec!["c"], None)));
//!
//! assert_eq!(list.items(), &["a", "b", "c"]);
//! assert!(!list.has_more());
//! ```

use tracing::debug;

use crate::Result;
use crate::report::Page;
use crate::traits::PageSource;

/// A ticket for one in-flight page fetch.
#[derive(Debug)]
#[must_use = "a page request must be passed back to Accumulator::complete"]
pub struct PageRequest {
    cursor: Option<String>,
    append: bool,
    generation: u64,
}

impl PageRequest {
    /// Cursor to send with the fetch, `None` for the first page.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Returns true if this request restarts the list.
    pub fn is_first_page(&self) -> bool {
        !self.append
    }
}

/// A list grown one page at a time.
#[derive(Debug, Clone)]
pub struct Accumulator<T> {
    key: Option<String>,
    items: Vec<T>,
    cursor: Option<String>,
    more: bool,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Accumulator<T> {
    pub fn new() -> Self {
        Self {
            key: None,
            items: Vec::new(),
            cursor: None,
            more: false,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Items accumulated so far, in arrival order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Cursor for the next page, if any.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Returns true if another page is available.
    pub fn has_more(&self) -> bool {
        self.more
    }

    /// Returns true while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the most recent failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Key the list is currently attached to.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Discard everything and start a first-page fetch.
    ///
    /// Any request issued before this call is invalidated; completing it
    /// later has no effect.
    pub fn begin_first_page(&mut self) -> PageRequest {
        self.generation = self.generation.wrapping_add(1);
        self.items.clear();
        self.cursor = None;
        self.more = false;
        self.error = None;
        self.loading = true;

        PageRequest {
            cursor: None,
            append: false,
            generation: self.generation,
        }
    }

    /// Start fetching the next page.
    ///
    /// Returns `None` when there is no cursor or a fetch is already in
    /// flight.
    pub fn begin_next_page(&mut self) -> Option<PageRequest> {
        if self.loading {
            return None;
        }
        let cursor = self.cursor.clone()?;

        self.loading = true;
        self.error = None;

        Some(PageRequest {
            cursor: Some(cursor),
            append: true,
            generation: self.generation,
        })
    }

    /// Apply the outcome of a fetch.
    ///
    /// A first page replaces the list and a next page is appended. On
    /// failure the items and cursor are left as they were. Returns false if
    /// the request was made before the last reset and was ignored.
    pub fn complete(&mut self, request: PageRequest, result: Result<Page<T>>) -> bool {
        if request.generation != self.generation {
            debug!("discarding page for a previous list");
            return false;
        }

        self.loading = false;

        match result {
            Ok(page) => {
                let received = page.items.len();
                if request.append {
                    self.items.extend(page.items);
                } else {
                    self.items = page.items;
                }
                self.cursor = page.next_cursor.filter(|c| !c.is_empty());
                self.more = self.cursor.is_some();
                debug!(
                    received,
                    total = self.items.len(),
                    more = self.more,
                    "page applied"
                );
            }
            Err(err) => {
                debug!(error = %err, "page fetch failed");
                self.error = Some(err.summary());
            }
        }

        true
    }

    /// Clear the list and fetch the first page from `source`.
    pub async fn reset_and_fetch_first_page<S>(&mut self, source: &S)
    where
        S: PageSource<Item = T> + ?Sized,
    {
        let request = self.begin_first_page();
        let result = source.fetch_page(None).await;
        self.complete(request, result);
    }

    /// Fetch the next page from `source` and append it.
    ///
    /// Does nothing, and does not call `source`, when there is no cursor or
    /// a fetch is in flight. Returns whether a fetch was made.
    pub async fn fetch_next_page<S>(&mut self, source: &S) -> bool
    where
        S: PageSource<Item = T> + ?Sized,
    {
        let Some(request) = self.begin_next_page() else {
            return false;
        };
        let result = source.fetch_page(request.cursor()).await;
        self.complete(request, result);
        true
    }

    /// Keep fetching until the source runs out or a fetch fails.
    pub async fn fetch_remaining<S>(&mut self, source: &S)
    where
        S: PageSource<Item = T> + ?Sized,
    {
        while self.error.is_none() && self.fetch_next_page(source).await {}
    }

    /// Attach the list to `key`, fetching the first page if the key changed.
    ///
    /// Switching keys drops the previous list entirely. Returns whether a
    /// fetch was made.
    pub async fn attach<S>(&mut self, key: impl Into<String>, source: &S) -> bool
    where
        S: PageSource<Item = T> + ?Sized,
    {
        let key = key.into();
        if self.key.as_deref() == Some(key.as_str()) {
            return false;
        }

        debug!(%key, "attaching list");
        self.key = Some(key);
        self.reset_and_fetch_first_page(source).await;
        true
    }
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}
