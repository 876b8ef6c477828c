//! Finding the icon `<link>` in a fetched page.

use std::sync::LazyLock;

use scraper::{Html, Selector};

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

selector!(LINK_SELECTOR, "link[rel][href]");

/// Returns the raw `href` of the first `<link>` anywhere in the document whose
/// `rel` is exactly one of `rels`, or `None` when there isn't one.
///
/// At most `limit` bytes are parsed. Invalid UTF-8 is replaced and broken
/// markup is tolerated by the parser; neither is reported.
pub(crate) fn icon_href(body: &[u8], limit: usize, rels: &[String]) -> Option<String> {
    let body = &body[..body.len().min(limit)];
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);
    document
        .select(&LINK_SELECTOR)
        .find(|link| link.value().attr("rel").is_some_and(|rel| rels.iter().any(|wanted| wanted == rel)))
        .and_then(|link| link.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}
