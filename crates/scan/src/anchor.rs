//! Anchor matching over raw HTML text.

use std::iter::FusedIterator;
use std::ops::Range;

use regex::CaptureMatches;

use crate::consts;

/// A single external anchor found in an HTML fragment.
///
/// Borrows from the scanned fragment; nothing is copied until the caller
/// asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorMatch<'h> {
    tag: &'h str,
    href: &'h str,
    start: usize,
}
impl<'h> AnchorMatch<'h> {
    /// The entire `<a ...>...</a>` text, exactly as it appears in the fragment.
    pub fn full_tag(&self) -> &'h str {
        self.tag
    }

    /// The link target with any surrounding quotes removed.
    pub fn href(&self) -> &'h str {
        self.href
    }

    /// Byte offset of the opening `<`.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset just past the closing `</a>`.
    pub fn end(&self) -> usize {
        self.start + self.tag.len()
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// Lazy iterator over the external anchors of a fragment, in document order.
///
/// Created by [`anchors`]. Once exhausted it stays exhausted; scan again to
/// start over.
#[derive(Debug)]
pub struct Anchors<'h> {
    captures: CaptureMatches<'static, 'h>,
}
impl<'h> Iterator for Anchors<'h> {
    type Item = AnchorMatch<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        let captures = self.captures.next()?;
        // Group 0 always participates; exactly one of the three value groups
        // participates, depending on how the value was quoted.
        let tag = captures.get(0)?;
        let href = captures.get(1).or_else(|| captures.get(2)).or_else(|| captures.get(3))?;
        Some(AnchorMatch {
            tag: tag.as_str(),
            href: href.as_str(),
            start: tag.start(),
        })
    }
}
impl FusedIterator for Anchors<'_> {}

/// Scans `html` for anchors pointing at `http` or `https` targets.
///
/// # Matching
/// - The tag name, the `href` attribute name and the `http` prefix are all
///   case-insensitive.
/// - The value may be double-quoted, single-quoted or bare.
/// - A match ends at the *first* `</a>` after the opening tag. An anchor
///   nested inside another is swallowed by the outer match.
/// - Unterminated or otherwise malformed anchors are skipped silently.
///
/// # Examples
///
/// ```rust
/// use favi_scan::anchors;
/// let html = r#"<p><a href="/home">Home</a> and <A HREF='https://example.com'>away</A></p>"#;
/// let hrefs: Vec<_> = anchors(html).map(|anchor| anchor.href()).collect();
/// assert_eq!(hrefs, ["https://example.com"]);
/// ```
pub fn anchors(html: &str) -> Anchors<'_> {
    Anchors {
        captures: consts::ANCHOR_REGEX.captures_iter(html),
    }
}
