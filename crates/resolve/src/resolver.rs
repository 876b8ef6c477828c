use std::sync::Arc;

use tracing::instrument;

use crate::cache::{FaviconCache, MemoryCache};
use crate::fetch::{CurlFetcher, DEFAULT_PAGE_LIMIT, FetcherHandle};
use crate::{Resolution, Strategy, page, site};

/// Prefix the service-proxy strategy puts in front of the link URL.
pub const DEFAULT_SERVICE_URL: &str = "http://www.google.com/s2/favicons?domain=";

/// Tunables for [`Resolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ResolverConfig {
    /// Prefix for [`Strategy::ServiceProxy`]; the link URL is appended verbatim.
    pub service_url: String,
    /// File names probed, in order, by [`Strategy::Thorough`].
    pub candidates: Vec<String>,
    /// `rel` values accepted when scanning a page for its icon link.
    pub icon_rels: Vec<String>,
    /// Maximum number of page bytes downloaded and parsed.
    pub page_limit: usize,
}
impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            candidates: vec!["favicon.ico".to_string(), "favicon.png".to_string()],
            icon_rels: vec!["shortcut icon".to_string()],
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Turns link URLs into favicon URLs.
///
/// Owns its memo table, so anything that might write to it takes `&mut self`;
/// a resolver shared between threads has to sit behind a lock.
///
/// # Examples
///
/// ```rust
/// use favi_resolve::{Resolution, Resolver, Strategy};
///
/// let mut resolver = Resolver::default();
/// assert_eq!(
///     resolver.resolve("https://example.com/some/page", Strategy::Plain),
///     Resolution::Resolved("https://example.com/favicon.ico".to_string()),
/// );
/// assert_eq!(
///     resolver.resolve("example.com", Strategy::ServiceProxy),
///     Resolution::Resolved("http://www.google.com/s2/favicons?domain=example.com".to_string()),
/// );
/// ```
pub struct Resolver {
    config: ResolverConfig,
    fetcher: FetcherHandle,
    cache: Box<dyn FaviconCache>,
}
impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default(), Arc::new(CurlFetcher::default()))
    }
}
impl Resolver {
    /// A resolver with an unbounded [`MemoryCache`].
    pub fn new(config: ResolverConfig, fetcher: FetcherHandle) -> Self {
        Self {
            config,
            fetcher,
            cache: Box::new(MemoryCache::new()),
        }
    }

    pub fn with_cache(self, cache: impl FaviconCache + 'static) -> Self {
        self.with_boxed_cache(Box::new(cache))
    }

    pub fn with_boxed_cache(mut self, cache: Box<dyn FaviconCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &dyn FaviconCache {
        self.cache.as_ref()
    }

    pub fn cache_mut(&mut self) -> &mut dyn FaviconCache {
        self.cache.as_mut()
    }

    /// Resolves the favicon for `url` using `strategy`.
    pub fn resolve(&mut self, url: &str, strategy: Strategy) -> Resolution {
        match strategy {
            Strategy::Plain => self.plain(url),
            Strategy::ServiceProxy => self.service_proxy(url),
            Strategy::Thorough => self.thorough(url),
        }
    }

    /// `{scheme}://{host}/favicon.ico`. See [`plain`](crate::plain).
    pub fn plain(&self, url: &str) -> Resolution {
        crate::plain(url)
    }

    /// The configured service URL with `url` appended, untouched.
    pub fn service_proxy(&self, url: &str) -> Resolution {
        Resolution::Resolved(format!("{}{}", self.config.service_url, url))
    }

    /// Memo, then candidate probes, then the page's icon link.
    ///
    /// Requests are made one at a time and stop at the first success. Only
    /// successes are memoized; an unresolved URL is looked up again next time.
    #[instrument(skip(self), fields(strategy = "thorough"))]
    pub fn thorough(&mut self, url: &str) -> Resolution {
        if let Some(favicon) = self.cache.get(url) {
            tracing::trace!(%favicon, "Memoized favicon");
            return Resolution::Resolved(favicon);
        }
        let Some(favicon) = self.probe_candidates(url).or_else(|| self.scan_page(url)) else {
            tracing::debug!("No favicon found");
            return Resolution::Unresolved;
        };
        self.cache.insert(url, &favicon);
        Resolution::Resolved(favicon)
    }

    fn probe_candidates(&self, url: &str) -> Option<String> {
        let base = url.trim_end_matches('/');
        for candidate in &self.config.candidates {
            let probe = format!("{}/{}", base, candidate);
            match self.fetcher.head(&probe) {
                Ok(head) if head.is_image() => {
                    tracing::debug!(%probe, "Favicon candidate accepted");
                    return Some(probe);
                },
                Ok(head) => {
                    tracing::debug!(
                        %probe,
                        status = head.status,
                        content_type = head.content_type.as_deref(),
                        "Favicon candidate rejected"
                    );
                },
                Err(err) => {
                    tracing::debug!(%probe, error = ?err, "Favicon candidate unreachable");
                },
            }
        }
        None
    }

    fn scan_page(&self, url: &str) -> Option<String> {
        let page = match self.fetcher.get(url) {
            Ok(page) => page,
            Err(err) => {
                tracing::debug!(error = ?err, "Page unreachable");
                return None;
            },
        };
        let href = page::icon_href(&page.body, self.config.page_limit, &self.config.icon_rels);
        tracing::debug!(
            status = page.status,
            bytes = page.body.len(),
            found = href.is_some(),
            "Page scanned for icon link"
        );
        href
    }
}

/// Derives `{scheme}://{host}/favicon.ico` without any I/O.
///
/// A missing scheme becomes `http`; a missing host is replaced by the path.
/// Only input with neither a host nor a path is [`Unresolved`](Resolution::Unresolved).
///
/// ```rust
/// use favi_resolve::{Resolution, plain};
/// assert_eq!(plain("example.com"), Resolution::Resolved("http://example.com/favicon.ico".to_string()));
/// assert_eq!(plain(""), Resolution::Unresolved);
/// ```
pub fn plain(url: &str) -> Resolution {
    site::plain_favicon(url).into()
}
