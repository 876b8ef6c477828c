use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// How a favicon URL gets derived from a link target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Guess `/favicon.ico` at the root of the link's host. No I/O.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "simple"))]
    Plain,
    /// Point at a third-party favicon-by-domain service. No I/O here; the
    /// service is only contacted when a client loads the image.
    #[cfg_attr(feature = "serde", serde(alias = "google", alias = "proxy"))]
    ServiceProxy,
    /// Probe for conventional icon files, then fall back to reading the page.
    /// Slow: performs blocking network requests on every memo miss.
    #[cfg_attr(feature = "serde", serde(alias = "complex"))]
    Thorough,
}
impl Strategy {
    pub const ALL: [Strategy; 3] = [Self::Plain, Self::ServiceProxy, Self::Thorough];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::ServiceProxy => "service-proxy",
            Self::Thorough => "thorough",
        }
    }

    /// Whether resolving with this strategy can touch the network.
    pub fn performs_io(&self) -> bool {
        matches!(self, Self::Thorough)
    }
}
impl FromStr for Strategy {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        Ok(match sanitized.as_str() {
            "plain" | "simple" => Self::Plain,
            "serviceproxy" | "proxy" | "google" => Self::ServiceProxy,
            "thorough" | "complex" => Self::Thorough,
            _ => exn::bail!(ErrorKind::UnknownStrategy(s.to_string())),
        })
    }
}
impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
