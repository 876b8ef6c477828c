//! Favicon resolution for link targets.
//!
//! Three [`Strategy`] variants trade accuracy for cost:
//!
//! - [`Plain`](Strategy::Plain) guesses `/favicon.ico` at the site root.
//! - [`ServiceProxy`](Strategy::ServiceProxy) defers to a favicon-by-domain
//!   web service.
//! - [`Thorough`](Strategy::Thorough) probes the site for conventional icon
//!   files and, failing that, reads the page for its icon `<link>`. Results
//!   are memoized in the resolver's [`FaviconCache`](cache::FaviconCache).
//!
//! Resolution is best-effort: every outcome is a [`Resolution`], never an
//! error. Network trouble is logged at `debug` and reported as
//! [`Resolution::Unresolved`].

pub mod cache;
pub mod error;
mod fetch;
mod page;
mod resolution;
mod resolver;
mod site;
mod strategy;

#[cfg(any(test, feature = "mock"))]
pub use crate::fetch::{MockFetcher, Request};
pub use crate::fetch::{CurlFetcher, DEFAULT_PAGE_LIMIT, Fetcher, FetcherHandle, Head, HttpConfig, Page};
pub use crate::resolution::Resolution;
pub use crate::resolver::{DEFAULT_SERVICE_URL, Resolver, ResolverConfig, plain};
pub use crate::strategy::Strategy;
