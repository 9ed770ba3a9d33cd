//! Markup cleanup: HTML tag stripping, shortcode stripping and escaping.
//!
//! Every function here is total. Anything that does not look like a
//! well-formed tag or shortcode is kept as literal text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// HTML comments, including the `<!--more-->` marker.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

/// An HTML tag: `<name ...>`, `</name>`, `<!DOCTYPE ...>` or `<?...?>`.
/// Quoted attribute values may contain `>` and `<`.
/// Captures: (1) the tag name, when there is one.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<(?:/?([A-Za-z][A-Za-z0-9-]*)(?:\s(?:"[^"]*"|'[^']*'|[^<>"'])*|/)?|[!?][^<>]*)>"#,
    )
    .expect("valid regex")
});

/// A shortcode token, in one of three shapes:
/// - `[[name ...]]`, an escaped shortcode that should be printed literally
/// - `[/name]`, a closing tag
/// - `[name ...]` / `[name /]`, an opening or self-closing tag
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[\[(?P<escaped>[A-Za-z][\w-]*(?:\s[^\[\]]*)?/?)\]\]|\[/(?P<close>[A-Za-z][\w-]*)\]|\[(?P<name>[A-Za-z][\w-]*)(?P<attrs>\s[^\[\]]*|/)?\]",
    )
    .expect("valid regex")
});

/// Tags that visually separate text; removing them must not glue words.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p",
    "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Remove HTML tags and comments from text.
///
/// A block-level tag sitting directly between two non-whitespace characters
/// is replaced by a single space so paragraphs don't run together. Stray
/// `<` characters (`a < b`, `<3`, an unterminated `<p`) are left alone.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::markup::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>world</b>.</p>"), "Hello world.");
/// assert_eq!(strip_tags("<p>One.</p><p>Two.</p>"), "One. Two.");
/// assert_eq!(strip_tags("a < b"), "a < b");
/// ```
pub fn strip_tags(text: &str) -> String {
    let without_comments = HTML_COMMENT.replace_all(text, "");
    let haystack = without_comments.as_ref();

    let mut out = String::with_capacity(haystack.len());
    let mut cursor = 0;
    for caps in HTML_TAG.captures_iter(haystack) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&haystack[cursor..whole.start()]);
        cursor = whole.end();

        let is_block = caps.get(1).is_some_and(|name| {
            BLOCK_TAGS.contains(&name.as_str().to_ascii_lowercase().as_str())
        });
        if is_block && glued(&out, &haystack[cursor..]) {
            out.push(' ');
        }
    }
    out.push_str(&haystack[cursor..]);
    out
}

/// True when text was emitted before a removed tag and more text follows,
/// with no whitespace on either side.
fn glued(before: &str, after: &str) -> bool {
    let last = before.chars().next_back();
    let next = after.chars().next();
    matches!((last, next), (Some(b), Some(a)) if !b.is_whitespace() && !a.is_whitespace())
}

/// Shortcodes every site has registered: media embeds and captions.
pub const DEFAULT_SHORTCODES: &[&str] = &[
    "caption",
    "wp_caption",
    "gallery",
    "audio",
    "video",
    "embed",
    "playlist",
];

/// Name that selects [`ShortcodeSet::Any`] in a name list.
pub const ANY_SHORTCODE: &str = "*";

/// The set of shortcode names that [`ShortcodeSet::strip`] removes.
///
/// Bracketed text whose name is not in the set (`[sic]`, `[The mayor]`) is
/// ordinary prose and is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcodeSet {
    /// Every well-formed shortcode is removed, registered or not.
    Any,

    /// Only the listed names are removed; other bracketed text is kept.
    Named(HashSet<String>),
}

impl Default for ShortcodeSet {
    fn default() -> Self {
        Self::from_names(DEFAULT_SHORTCODES.iter().copied())
    }
}

impl ShortcodeSet {
    /// Build a set from registered names.
    ///
    /// An empty list means the default registry ([`DEFAULT_SHORTCODES`]);
    /// a list containing [`ANY_SHORTCODE`] means [`ShortcodeSet::Any`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: HashSet<String> = names.into_iter().map(Into::into).collect();
        if names.contains(ANY_SHORTCODE) {
            Self::Any
        } else if names.is_empty() {
            Self::default()
        } else {
            Self::Named(names)
        }
    }

    fn contains(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Named(names) => names.contains(name),
        }
    }

    /// Remove shortcodes from text.
    ///
    /// An opening tag with a matching `[/name]` further on is removed
    /// together with everything up to and including the closing tag. Without
    /// a closing tag only the opening tag goes. Escaped shortcodes
    /// (`[[name]]`) are unescaped and kept.
    pub fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;

        while let Some(caps) = SHORTCODE.captures_at(text, cursor) {
            let Some(whole) = caps.get(0) else {
                break;
            };
            out.push_str(&text[cursor..whole.start()]);
            cursor = whole.end();

            if let Some(escaped) = caps.name("escaped") {
                let name = leading_name(escaped.as_str());
                if self.contains(name) {
                    out.push('[');
                    out.push_str(escaped.as_str());
                    out.push(']');
                } else {
                    out.push_str(whole.as_str());
                }
                continue;
            }

            if let Some(close) = caps.name("close") {
                if !self.contains(close.as_str()) {
                    out.push_str(whole.as_str());
                }
                continue;
            }

            let Some(name) = caps.name("name").map(|m| m.as_str()) else {
                continue;
            };
            if !self.contains(name) {
                out.push_str(whole.as_str());
                continue;
            }

            let self_closing = caps
                .name("attrs")
                .is_some_and(|attrs| attrs.as_str().trim_end().ends_with('/'));
            if self_closing {
                continue;
            }

            let closing_tag = format!("[/{name}]");
            if let Some(offset) = text[cursor..].find(&closing_tag) {
                tracing::trace!(shortcode = name, "Removing enclosing shortcode");
                cursor += offset + closing_tag.len();
            }
        }

        out.push_str(&text[cursor..]);
        out
    }
}

/// The shortcode name at the start of an escaped token body.
fn leading_name(body: &str) -> &str {
    let end = body
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(body.len());
    &body[..end]
}

/// Remove the default registered shortcodes from text.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::markup::strip_shortcodes;
///
/// assert_eq!(strip_shortcodes("Intro [gallery ids=\"1,2\"] outro"), "Intro  outro");
/// assert_eq!(strip_shortcodes("A [caption]photo[/caption]B"), "A B");
/// assert_eq!(strip_shortcodes("He wrote it [sic]."), "He wrote it [sic].");
/// ```
pub fn strip_shortcodes(text: &str) -> String {
    ShortcodeSet::default().strip(text)
}

/// Prepare raw post content for sentence analysis.
///
/// Normalizes to NFC, removes the default registered shortcodes, then
/// removes tags.
pub fn clean_text(text: &str) -> String {
    clean_text_with(text, &ShortcodeSet::default())
}

/// [`clean_text`] restricted to a set of registered shortcodes.
pub fn clean_text_with(text: &str, shortcodes: &ShortcodeSet) -> String {
    let normalized: String = text.nfc().collect();
    strip_tags(&shortcodes.strip(&normalized))
}

/// Escape text for use inside HTML element content.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::markup::escape_html;
///
/// assert_eq!(escape_html("Tom & \"Jerry\" <3"), "Tom &amp; &quot;Jerry&quot; &lt;3");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attr(text: &str) -> String {
    escape_html(text.trim())
}
