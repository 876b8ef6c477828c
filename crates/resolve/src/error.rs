//! Resolution Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction. Only the [`Fetcher`](crate::Fetcher) seam and
//! [`Strategy`](crate::Strategy) parsing can fail; the resolver itself turns
//! every failure into [`Resolution::Unresolved`](crate::Resolution).

use derive_more::{Display, Error};

/// A resolution error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The URL was rejected before any request was made.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// The request could not be completed (DNS, connection, TLS, ...).
    #[display("transport error fetching {_0}")]
    Transport(#[error(not(source))] String),
    /// The request took longer than the configured timeout.
    #[display("timed out fetching {_0}")]
    Timeout(#[error(not(source))] String),
    /// A strategy name that doesn't match any known strategy.
    #[display("unknown resolution strategy: {_0}")]
    UnknownStrategy(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}
