//! In-memory fetcher for testing.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{Fetcher, Head, Page};
use crate::error::{ErrorKind, Result};

/// A request received by [`MockFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Head(String),
    Get(String),
}

/// Canned-response fetcher for testing.
///
/// URLs without a canned response fail with
/// [`Transport`](crate::error::ErrorKind::Transport), the same way an
/// unreachable host would. Every request is recorded, so tests can assert on
/// exactly which requests were (or weren't) made.
#[derive(Debug, Default)]
pub struct MockFetcher {
    heads: HashMap<String, Head>,
    pages: HashMap<String, Page>,
    requests: Mutex<Vec<Request>>,
}
impl MockFetcher {
    /// Answer HEAD requests for `url` with `status` and `content_type`.
    pub fn with_head(mut self, url: impl Into<String>, status: u32, content_type: impl Into<String>) -> Self {
        let head = Head {
            status,
            content_type: Some(content_type.into()).filter(|ct| !ct.is_empty()),
        };
        self.heads.insert(url.into(), head);
        self
    }

    /// Answer GET requests for `url` with a `200` and `body`.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.with_page_status(url, 200, body)
    }

    pub fn with_page_status(mut self, url: impl Into<String>, status: u32, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(url.into(), Page { status, body: body.into() });
        self
    }

    /// Every request made so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.log().clone()
    }

    pub fn reset(&self) {
        self.log().clear();
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<Request>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Fetcher for MockFetcher {
    fn head(&self, url: &str) -> Result<Head> {
        self.log().push(Request::Head(url.to_string()));
        match self.heads.get(url) {
            Some(head) => Ok(head.clone()),
            None => exn::bail!(ErrorKind::Transport(url.to_string())),
        }
    }

    fn get(&self, url: &str) -> Result<Page> {
        self.log().push(Request::Get(url.to_string()));
        match self.pages.get(url) {
            Some(page) => Ok(page.clone()),
            None => exn::bail!(ErrorKind::Transport(url.to_string())),
        }
    }
}
