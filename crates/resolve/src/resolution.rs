/// Outcome of resolving a favicon.
///
/// Resolution never fails loudly. Anything that goes wrong along the way
/// (unreachable hosts, timeouts, pages without an icon link) ends up as
/// [`Unresolved`](Self::Unresolved).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// A favicon URL, exactly as it was derived or found.
    Resolved(String),
    /// No favicon could be determined.
    #[default]
    Unresolved,
}
impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Resolved(url) => Some(url.as_str()),
            Self::Unresolved => None,
        }
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Resolved(url) => Some(url),
            Self::Unresolved => None,
        }
    }
}
impl From<Option<String>> for Resolution {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Unresolved, Self::Resolved)
    }
}
impl From<Resolution> for Option<String> {
    fn from(value: Resolution) -> Self {
        value.into_option()
    }
}
