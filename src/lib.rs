//! Prepends site favicons to the external links of an HTML fragment.
//!
//! Every `<a href="http...">...</a>` in the fragment gets an inline
//! `<img src='{favicon}'/>` placed immediately in front of it. Everything
//! else is copied through untouched. The favicon comes from a
//! [`Resolver`] using one of three [`Strategy`] variants; anchors whose
//! favicon can't be resolved are left as they are.
//!
//! ```rust
//! let html = r#"<p>Read <a href="https://example.com/post">this</a>.</p>"#;
//! assert_eq!(
//!     favi::prepend_favicons(html),
//!     r#"<p>Read <img src='https://example.com/favicon.ico'/><a href="https://example.com/post">this</a>.</p>"#,
//! );
//! ```

pub mod error;
pub mod logging;

use std::borrow::Cow;
use std::sync::Arc;

pub use favi_config::Config;
pub use favi_resolve::{Resolution, Resolver, Strategy};
use favi_resolve::CurlFetcher;
use favi_scan::{image_tag, rewrite};
use tracing::instrument;

/// Rewrites HTML fragments with a single resolver and strategy.
///
/// The resolver's memo lives as long as the prepender, so reusing one across
/// fragments saves repeat lookups under [`Strategy::Thorough`].
pub struct Prepender {
    resolver: Resolver,
    strategy: Strategy,
}
impl Default for Prepender {
    fn default() -> Self {
        Self::new(Resolver::default(), Strategy::default())
    }
}
impl Prepender {
    pub fn new(resolver: Resolver, strategy: Strategy) -> Self {
        Self { resolver, strategy }
    }

    /// Wires a libcurl-backed resolver and its cache up from `config`.
    pub fn from_config(config: &Config) -> Self {
        let fetcher = CurlFetcher::new(config.http.clone()).with_page_limit(config.resolver.page_limit);
        let resolver =
            Resolver::new(config.resolver.clone(), Arc::new(fetcher)).with_boxed_cache(config.cache.build());
        Self::new(resolver, config.strategy)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut Resolver {
        &mut self.resolver
    }

    /// Places a favicon in front of every external anchor in `html`.
    ///
    /// Never fails: anchors that can't be resolved are skipped. When nothing
    /// is inserted the input is returned as-is, without copying.
    #[instrument(skip_all, fields(strategy = %self.strategy, html_size = html.len()))]
    pub fn prepend<'h>(&mut self, html: &'h str) -> Cow<'h, str> {
        let strategy = self.strategy;
        let resolver = &mut self.resolver;
        rewrite(html, |anchor| {
            let favicon = resolver.resolve(anchor.href(), strategy).into_option()?;
            Some(image_tag(&favicon))
        })
    }
}

/// [`Prepender::prepend`] with [`Strategy::Plain`], which never touches the
/// network.
pub fn prepend_favicons(html: &str) -> String {
    rewrite(html, |anchor| {
        let favicon = favi_resolve::plain(anchor.href()).into_option()?;
        Some(image_tag(&favicon))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use favi_resolve::cache::{BoundedCache, FaviconCache};
    use favi_resolve::{MockFetcher, Request, ResolverConfig};
    use rstest::rstest;
    use std::num::NonZeroUsize;

    fn prepender(strategy: Strategy, fetcher: &Arc<MockFetcher>) -> Prepender {
        Prepender::new(Resolver::new(ResolverConfig::default(), fetcher.clone()), strategy)
    }

    fn head(url: &str) -> Request {
        Request::Head(url.to_string())
    }

    #[rstest]
    #[case::empty("")]
    #[case::text("Just some words.")]
    #[case::markup("<ul><li><strong>Bold</strong> claim</li></ul>")]
    #[case::unclosed_anchor(r#"<a href="http://example.com">never closed"#)]
    fn no_anchors_means_no_change(
        #[case] html: &str,
        #[values(Strategy::Plain, Strategy::ServiceProxy, Strategy::Thorough)] strategy: Strategy,
    ) {
        let fetcher = Arc::new(MockFetcher::default());
        let output = prepender(strategy, &fetcher).prepend(html);
        assert!(matches!(output, Cow::Borrowed(_)));
        assert_eq!(output, html);
        assert!(fetcher.requests().is_empty());
    }

    #[rstest]
    #[case::relative(r#"<a href="/about">about</a>"#)]
    #[case::fragment(r##"<a href="#top">top</a>"##)]
    #[case::mailto(r#"<a href="mailto:me@example.com">mail</a>"#)]
    #[case::ftp(r#"<a href="ftp://files.example.com">files</a>"#)]
    #[case::protocol_relative(r#"<a href="//cdn.example.com">cdn</a>"#)]
    fn non_http_hrefs_get_no_image(#[case] html: &str) {
        assert_eq!(prepend_favicons(html), html);
    }

    #[rstest]
    #[case(
        r#"<a href="http://example.com/page">text</a>"#,
        r#"<img src='http://example.com/favicon.ico'/><a href="http://example.com/page">text</a>"#
    )]
    #[case(
        r#"<a href="https://secure.example.org/a/b?c=d">x</a>"#,
        r#"<img src='https://secure.example.org/favicon.ico'/><a href="https://secure.example.org/a/b?c=d">x</a>"#
    )]
    #[case(
        r#"<a title="a > b" href="http://example.com">x</a>"#,
        r#"<img src='http://example.com/favicon.ico'/><a title="a > b" href="http://example.com">x</a>"#
    )]
    fn plain_prepends_site_root_icon(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(prepend_favicons(html), expected);
    }

    #[test]
    fn service_proxy_appends_url_verbatim() {
        let fetcher = Arc::new(MockFetcher::default());
        let html = r#"<a href="http://example.com/page?x=1&y=2">t</a>"#;
        assert_eq!(
            prepender(Strategy::ServiceProxy, &fetcher).prepend(html),
            r#"<img src='http://www.google.com/s2/favicons?domain=http://example.com/page?x=1&y=2'/><a href="http://example.com/page?x=1&y=2">t</a>"#
        );
        assert!(fetcher.requests().is_empty());
    }

    #[rstest]
    #[case::double(r#"<a href="http://x">x</a>"#)]
    #[case::single(r#"<a href='http://x'>x</a>"#)]
    #[case::unquoted(r#"<a href=http://x>x</a>"#)]
    #[case::uppercase(r#"<A HREF="http://x">x</A>"#)]
    #[case::other_attributes(r#"<a class="ext" href="http://x" target="_blank">x</a>"#)]
    fn every_quoting_style_yields_the_url(#[case] html: &str) {
        let fetcher = Arc::new(MockFetcher::default());
        let output = prepender(Strategy::ServiceProxy, &fetcher).prepend(html);
        assert_eq!(output, format!("<img src='http://www.google.com/s2/favicons?domain=http://x'/>{html}"));
    }

    #[test]
    fn each_anchor_gets_its_own_image() {
        let html = concat!(
            r#"<p>First <a href="http://one.example/x">one</a>, "#,
            r#"then <a href="/local">local</a> "#,
            r#"and <a href="https://two.example">two</a>.</p>"#,
        );
        let expected = concat!(
            r#"<p>First <img src='http://one.example/favicon.ico'/><a href="http://one.example/x">one</a>, "#,
            r#"then <a href="/local">local</a> "#,
            r#"and <img src='https://two.example/favicon.ico'/><a href="https://two.example">two</a>.</p>"#,
        );
        assert_eq!(prepend_favicons(html), expected);
    }

    #[test]
    fn quote_in_favicon_url_is_escaped() {
        let fetcher = Arc::new(MockFetcher::default());
        let output = prepender(Strategy::ServiceProxy, &fetcher).prepend(r#"<a href="http://x/it's">x</a>"#);
        assert_eq!(
            output,
            r#"<img src='http://www.google.com/s2/favicons?domain=http://x/it&#39;s'/><a href="http://x/it's">x</a>"#
        );
    }

    #[test]
    fn strategy_can_be_swapped() {
        let prepender = Prepender::default().with_strategy(Strategy::ServiceProxy);
        assert_eq!(prepender.strategy(), Strategy::ServiceProxy);
    }

    #[test]
    fn from_config_uses_configured_strategy_and_cache() {
        let mut config = Config::default();
        config.strategy = Strategy::ServiceProxy;
        config.cache.enabled = false;
        let mut prepender = Prepender::from_config(&config);
        assert_eq!(prepender.strategy(), Strategy::ServiceProxy);
        let output = prepender.prepend(r#"<a href="http://a.example">a</a>"#);
        assert_eq!(
            output,
            r#"<img src='http://www.google.com/s2/favicons?domain=http://a.example'/><a href="http://a.example">a</a>"#
        );
        assert!(prepender.resolver().cache().is_empty());
    }

    #[test]
    fn thorough_probe_then_memo() {
        let fetcher = Arc::new(MockFetcher::default().with_head("http://example.com/favicon.png", 200, "image/png"));
        let mut prepender = prepender(Strategy::Thorough, &fetcher);
        let html = r#"<a href="http://example.com">a</a> <a href="http://example.com">b</a>"#;
        assert_eq!(
            prepender.prepend(html),
            concat!(
                r#"<img src='http://example.com/favicon.png'/><a href="http://example.com">a</a> "#,
                r#"<img src='http://example.com/favicon.png'/><a href="http://example.com">b</a>"#,
            )
        );
        // The second anchor came from the memo.
        assert_eq!(
            fetcher.requests(),
            [head("http://example.com/favicon.ico"), head("http://example.com/favicon.png")]
        );
    }

    #[test]
    fn memo_is_shared_across_fragments() {
        let fetcher = Arc::new(MockFetcher::default().with_head("http://up.example/favicon.ico", 200, "image/x-icon"));
        let mut prepender = prepender(Strategy::Thorough, &fetcher);
        let html = r#"<a href="http://up.example">up</a>"#;
        let expected = r#"<img src='http://up.example/favicon.ico'/><a href="http://up.example">up</a>"#;
        assert_eq!(prepender.prepend(html), expected);
        fetcher.reset();
        assert_eq!(prepender.prepend(html), expected);
        assert!(fetcher.requests().is_empty());
        assert_eq!(prepender.resolver().cache().len(), 1);
    }

    #[test]
    fn thorough_falls_back_to_the_page_icon() {
        let page = concat!(
            "<html><head><title>Example</title></head>",
            r#"<body><link rel="shortcut icon" href="http://static.example.com/icon.ico"></body></html>"#,
        );
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_head("http://example.com/favicon.ico", 404, "text/html")
                .with_head("http://example.com/favicon.png", 200, "text/html")
                .with_page("http://example.com", page),
        );
        let output = prepender(Strategy::Thorough, &fetcher).prepend(r#"<a href="http://example.com">x</a>"#);
        assert_eq!(output, r#"<img src='http://static.example.com/icon.ico'/><a href="http://example.com">x</a>"#);
    }

    #[test]
    fn thorough_with_nothing_found_leaves_anchor_alone() {
        let fetcher = Arc::new(MockFetcher::default());
        let mut prepender = prepender(Strategy::Thorough, &fetcher);
        let html = r#"<a href="http://down.example">down</a>"#;
        assert_eq!(prepender.prepend(html), html);
        assert_eq!(
            fetcher.requests(),
            [
                head("http://down.example/favicon.ico"),
                head("http://down.example/favicon.png"),
                Request::Get("http://down.example".to_string()),
            ]
        );
        assert!(prepender.resolver().cache().is_empty());
    }

    #[test]
    fn thorough_with_bounded_cache_evicts() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_head("http://a.example/favicon.ico", 200, "image/x-icon")
                .with_head("http://b.example/favicon.ico", 200, "image/x-icon"),
        );
        let resolver =
            Resolver::new(ResolverConfig::default(), fetcher.clone()).with_cache(BoundedCache::new(NonZeroUsize::MIN));
        let mut prepender = Prepender::new(resolver, Strategy::Thorough);
        prepender.prepend(r#"<a href="http://a.example">a</a><a href="http://b.example">b</a>"#);
        fetcher.reset();
        prepender.prepend(r#"<a href="http://a.example">a</a>"#);
        assert_eq!(fetcher.requests(), [head("http://a.example/favicon.ico")]);
    }
}
