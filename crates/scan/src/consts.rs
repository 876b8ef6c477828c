use regex::Regex;
use std::sync::LazyLock;

// Opening tag: `<a` plus whitespace, then any attributes up to one named `href`.
// Quoted values are skipped whole, so a `>` inside one doesn't end the tag.
const OPEN_TAG: &str = r#"<a\s(?:(?:"[^"]*"|'[^']*'|[^>"'])*?\s)?href\s*=\s*"#;
// The three legal spellings of the attribute value; each must start with `http`.
const HREF_VALUE: &str = r#"(?:"(http[^"]*)"|'(http[^']*)'|(http[^\s>]*))"#;
// Rest of the opening tag, then everything up to the first closing tag.
const TAIL: &str = r"[^>]*>.*?</a>";

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

regex!(ANCHOR_REGEX, format!("(?is){}{}{}", OPEN_TAG, HREF_VALUE, TAIL).as_str());
