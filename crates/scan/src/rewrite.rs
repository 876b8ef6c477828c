//! Splicing content in front of matched anchors.

use std::borrow::Cow;

use tracing::instrument;

use crate::anchor::{AnchorMatch, anchors};

/// Rewrites `html`, inserting whatever `prefix` returns immediately before
/// each external anchor.
///
/// `prefix` is called once per anchor, in document order. Returning `None`
/// leaves that anchor alone. Anchors themselves and all text between them are
/// copied through byte for byte. When nothing gets inserted the original
/// fragment is handed back as [`Cow::Borrowed`].
///
/// # Examples
///
/// ```rust
/// use favi_scan::rewrite;
/// let html = r#"See <a href="http://example.com">this</a>."#;
/// let output = rewrite(html, |_| Some("[ext]".to_string()));
/// assert_eq!(output, r#"See [ext]<a href="http://example.com">this</a>."#);
/// ```
#[instrument(level = "debug", skip_all, fields(html_size = html.len(), inserted))]
pub fn rewrite<'h, F>(html: &'h str, mut prefix: F) -> Cow<'h, str>
where
    F: FnMut(&AnchorMatch<'h>) -> Option<String>,
{
    let mut output = String::new();
    let mut copied = 0;
    let mut inserted = 0_usize;
    for anchor in anchors(html) {
        let Some(insert) = prefix(&anchor) else {
            continue;
        };
        if inserted == 0 {
            output.reserve(html.len() + insert.len());
        }
        output.push_str(&html[copied..anchor.start()]);
        output.push_str(&insert);
        copied = anchor.start();
        inserted += 1;
    }
    tracing::Span::current().record("inserted", inserted);
    if inserted == 0 {
        return Cow::Borrowed(html);
    }
    output.push_str(&html[copied..]);
    Cow::Owned(output)
}

/// Builds the inline image placed in front of an anchor.
///
/// The attribute is single-quoted; a `'` inside the URL is written as `&#39;`
/// so it cannot terminate the attribute early. Nothing else is escaped.
///
/// ```rust
/// assert_eq!(favi_scan::image_tag("http://x/favicon.ico"), "<img src='http://x/favicon.ico'/>");
/// ```
pub fn image_tag(src: &str) -> String {
    format!("<img src='{}'/>", src.replace('\'', "&#39;"))
}
