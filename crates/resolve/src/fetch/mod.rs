//! The network seam used by the thorough strategy.
//!
//! [`Fetcher`] is tiny: a HEAD request that reports the status
//! and content type, and a GET that returns the body. [`CurlFetcher`] is the
//! real implementation; tests use the in-memory `MockFetcher`.

mod libcurl;
#[cfg(any(test, feature = "mock"))]
mod mock;

use std::sync::Arc;

pub use self::libcurl::{CurlFetcher, DEFAULT_PAGE_LIMIT, HttpConfig};
#[cfg(any(test, feature = "mock"))]
pub use self::mock::{MockFetcher, Request};
use crate::error::Result;

/// Shared handle to a fetcher.
pub type FetcherHandle = Arc<dyn Fetcher>;

/// Response metadata from a HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub status: u32,
    pub content_type: Option<String>,
}
impl Head {
    /// Status is exactly `200` and the content type mentions `image`
    /// (case-sensitive, anywhere in the header value).
    pub fn is_image(&self) -> bool {
        self.status == 200 && self.content_type.as_deref().is_some_and(|ct| ct.contains("image"))
    }
}

/// A fetched page. The body may have been cut short by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Blocking HTTP access for favicon discovery.
///
/// Implementations run on the calling thread; there are no retries and no
/// timeouts beyond what the implementation configures for itself.
pub trait Fetcher: Send + Sync {
    /// Issue a HEAD request for `url`.
    fn head(&self, url: &str) -> Result<Head>;

    /// Issue a GET request for `url`, returning the (possibly truncated) body
    /// regardless of status code.
    fn get(&self, url: &str) -> Result<Page>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200, Some("image/x-icon"), true)]
    #[case(200, Some("image/png; charset=binary"), true)]
    #[case(200, Some("application/octet-stream+image"), true)]
    #[case(200, Some("Image/PNG"), false)]
    #[case(200, Some("text/html"), false)]
    #[case(200, None, false)]
    #[case(204, Some("image/png"), false)]
    #[case(301, Some("image/png"), false)]
    #[case(404, Some("image/png"), false)]
    fn image_detection(#[case] status: u32, #[case] content_type: Option<&str>, #[case] expected: bool) {
        let head = Head {
            status,
            content_type: content_type.map(str::to_string),
        };
        assert_eq!(head.is_image(), expected);
    }
}
