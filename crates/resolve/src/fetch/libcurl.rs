//! libcurl-backed fetcher.

use std::time::Duration;

use curl::easy::Easy;
use exn::ResultExt;
use tracing::instrument;

use super::{Fetcher, Head, Page};
use crate::error::{ErrorKind, Result};

/// Default upper bound on how much of a page gets downloaded.
pub const DEFAULT_PAGE_LIMIT: usize = 256 * 1024;

/// Transport settings for [`CurlFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct HttpConfig {
    /// Seconds allowed for establishing a connection; `None` keeps libcurl's default.
    pub connect_timeout: Option<u64>,
    /// Seconds allowed for a whole request; `None` means no limit.
    pub timeout: Option<u64>,
    pub follow_redirects: bool,
    pub max_redirects: u32,
}
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(3),
            timeout: Some(5),
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}

/// Blocking fetcher built on libcurl. A fresh handle is used per request.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    config: HttpConfig,
    page_limit: usize,
}
impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(HttpConfig::default())
    }
}
impl CurlFetcher {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            config,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Stop downloading a page body after `limit` bytes.
    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    fn handle(&self, url: &str) -> Result<Easy> {
        let mut easy = Easy::new();
        easy.url(url).or_raise(|| ErrorKind::InvalidUrl(url.to_string()))?;
        let transport = || ErrorKind::Transport(url.to_string());
        easy.follow_location(self.config.follow_redirects).or_raise(transport)?;
        easy.max_redirections(self.config.max_redirects).or_raise(transport)?;
        if let Some(secs) = self.config.connect_timeout {
            easy.connect_timeout(Duration::from_secs(secs)).or_raise(transport)?;
        }
        if let Some(secs) = self.config.timeout {
            easy.timeout(Duration::from_secs(secs)).or_raise(transport)?;
        }
        Ok(easy)
    }
}

impl Fetcher for CurlFetcher {
    #[instrument(level = "debug", skip(self))]
    fn head(&self, url: &str) -> Result<Head> {
        let mut easy = self.handle(url)?;
        easy.nobody(true).or_raise(|| ErrorKind::Transport(url.to_string()))?;
        performed(url, easy.perform())?;
        let status = easy.response_code().or_raise(|| ErrorKind::Transport(url.to_string()))?;
        let content_type = easy
            .content_type()
            .or_raise(|| ErrorKind::Transport(url.to_string()))?
            .map(str::to_string);
        tracing::debug!(status, content_type = content_type.as_deref(), "HEAD complete");
        Ok(Head { status, content_type })
    }

    #[instrument(level = "debug", skip(self), fields(limit = self.page_limit))]
    fn get(&self, url: &str) -> Result<Page> {
        let mut easy = self.handle(url)?;
        let limit = self.page_limit;
        let mut body = Vec::new();
        let mut truncated = false;
        let outcome = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    let room = limit.saturating_sub(body.len());
                    if data.len() > room {
                        body.extend_from_slice(&data[..room]);
                        truncated = true;
                        // Short write: libcurl aborts the transfer.
                        return Ok(0);
                    }
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .or_raise(|| ErrorKind::Transport(url.to_string()))?;
            transfer.perform()
        };
        match outcome {
            Err(err) if truncated && err.is_write_error() => {
                tracing::debug!(bytes = body.len(), "Page body cut off at limit");
            },
            outcome => performed(url, outcome)?,
        }
        let status = easy.response_code().or_raise(|| ErrorKind::Transport(url.to_string()))?;
        tracing::debug!(status, bytes = body.len(), "GET complete");
        Ok(Page { status, body })
    }
}

/// Maps the outcome of `perform()` onto our error kinds.
fn performed(url: &str, outcome: std::result::Result<(), curl::Error>) -> Result<()> {
    let kind = match &outcome {
        Err(err) if err.is_operation_timedout() => ErrorKind::Timeout(url.to_string()),
        Err(err) if err.is_url_malformed() || err.is_unsupported_protocol() => ErrorKind::InvalidUrl(url.to_string()),
        _ => ErrorKind::Transport(url.to_string()),
    };
    outcome.or_raise(|| kind.clone())
}
