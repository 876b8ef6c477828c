//! CLI Error Types

use derive_more::{Display, Error};
use favi_config::error::{Error as ConfigError, ErrorKind as ConfigErrorKind};

/// A favi error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for favi operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration couldn't be loaded or is invalid.
    #[display("configuration error: {_0}")]
    Config(ConfigErrorKind),
    /// Reading the input or writing the output failed.
    #[display("I/O error: {_0}")]
    Io(#[error(not(source))] String),
}
impl ErrorKind {
    /// Convert a configuration error into a favi error, keeping the config
    /// crate's `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn config(err: ConfigError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Config(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
