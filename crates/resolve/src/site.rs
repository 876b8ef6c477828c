//! Splitting link targets into the scheme and host the plain strategy needs.

use url::{ParseError, Url};

const DEFAULT_SCHEME: &str = "http";

/// The root of the site a link points at.
///
/// Ports, credentials, queries and fragments are dropped. The scheme and host
/// are kept exactly as written: no lowercasing, no punycode. When a link has no
/// host at all (`example.com/page`, `mailto:someone@example.com`) its path
/// stands in for the host, so something usable comes out of almost any input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SiteRoot {
    scheme: String,
    host: String,
}
impl SiteRoot {
    /// Returns `None` only when the input has neither a host nor a path.
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match Url::parse(input) {
            // The parser normalises hosts, so only its verdict is used; the text
            // itself comes from the link.
            Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => Self::split(input),
            Ok(url) => Self::new(url.scheme(), url.path()),
            Err(ParseError::RelativeUrlWithoutBase) => Self::split(input),
            Err(err) => {
                tracing::trace!(url = input, error = %err, "URL rejected by parser; splitting by hand");
                Self::split(input)
            },
        }
    }

    pub(crate) fn favicon(&self) -> String {
        format!("{}://{}/favicon.ico", self.scheme, self.host)
    }

    fn new(scheme: &str, host: &str) -> Option<Self> {
        let host = host.trim_end_matches('/');
        if host.is_empty() {
            return None;
        }
        let scheme = if scheme.is_empty() { DEFAULT_SCHEME } else { scheme };
        Some(Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
        })
    }

    /// Lenient fallback for input the URL parser refuses, either because it
    /// is relative or because the host contains characters it won't accept.
    fn split(input: &str) -> Option<Self> {
        let input = input.split(['?', '#']).next().unwrap_or_default();
        let (scheme, rest) = match input.split_once(':') {
            Some((scheme, rest)) if is_scheme(scheme) => (scheme, rest),
            _ => (DEFAULT_SCHEME, input),
        };
        let Some(rest) = rest.strip_prefix("//") else {
            return Self::new(scheme, rest);
        };
        let (authority, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
        let host = strip_port(authority.rsplit('@').next().unwrap_or_default());
        if host.is_empty() { Self::new(scheme, path) } else { Self::new(scheme, host) }
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 literal, keep the brackets.
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split(':').next().unwrap_or_default()
}

/// Derives `{scheme}://{host}/favicon.ico` for a link target.
pub(crate) fn plain_favicon(url: &str) -> Option<String> {
    SiteRoot::parse(url).map(|root| root.favicon())
}
