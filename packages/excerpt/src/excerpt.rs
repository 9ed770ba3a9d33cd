//! Teaser paragraphs for post listings.
//!
//! The teaser comes from one of three sources, in order of preference:
//! a hand-written excerpt, the part of the content before `<!--more-->`
//! (front page only), or the first few sentences of the content.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SENTENCE_COUNT;
use crate::markup::{clean_text_with, escape_attr, escape_html, strip_tags, ShortcodeSet};
use crate::sentences::take_sentences;
use crate::types::{Post, View};

/// How a teaser is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcerptOptions {
    /// Sentences kept when the teaser is cut from the content.
    pub sentence_count: usize,

    /// Append a "read more" link.
    pub use_more: bool,

    /// Text of the "read more" link. No link is rendered when empty.
    pub more_link_text: String,

    /// Remove HTML tags from the teaser.
    pub strip_tags: bool,

    /// Remove shortcodes from the teaser.
    pub strip_shortcodes: bool,

    /// Registered shortcode names. Empty means the default registry;
    /// `"*"` strips every shortcode-shaped token.
    pub shortcodes: Vec<String>,
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        Self {
            sentence_count: DEFAULT_SENTENCE_COUNT,
            use_more: true,
            more_link_text: String::new(),
            strip_tags: true,
            strip_shortcodes: true,
            shortcodes: Vec::new(),
        }
    }
}

impl ExcerptOptions {
    /// Link text actually rendered, or `None` when no link should appear.
    fn more_text(&self) -> Option<&str> {
        Some(self.more_link_text.as_str()).filter(|text| self.use_more && !text.is_empty())
    }

    fn shortcode_set(&self) -> ShortcodeSet {
        ShortcodeSet::from_names(self.shortcodes.iter().cloned())
    }
}

/// Where a teaser body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcerptSource {
    /// The post's hand-written excerpt.
    Custom,

    /// Content before the `<!--more-->` marker.
    MoreTag,

    /// Leading sentences of the content.
    Sentences,
}

/// The more marker, `<!--more-->` or `<!--more Custom link text-->`.
/// Captures: (1) the custom link text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MORE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--more(.*?)-->").expect("valid regex"));

/// Position of the more marker and its custom link text, when the marker
/// splits the content into a non-empty teaser and the rest.
fn more_marker(content: &str) -> Option<(usize, Option<&str>)> {
    let caps = MORE_MARKER.captures(content)?;
    let whole = caps.get(0)?;
    if whole.start() == 0 {
        return None;
    }
    let custom = caps
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|text| !text.is_empty());
    Some((whole.start(), custom))
}

/// Pick the teaser body for a post, before any stripping.
pub fn excerpt_source(post: &Post, options: &ExcerptOptions, view: View) -> (ExcerptSource, String) {
    if let Some(custom) = post.custom_excerpt() {
        return (ExcerptSource::Custom, custom.trim().to_string());
    }

    if view == View::Home {
        if let Some((pos, _)) = more_marker(&post.content) {
            return (ExcerptSource::MoreTag, post.content[..pos].trim().to_string());
        }
    }

    let clean = clean_text_with(&post.content, &options.shortcode_set());
    (
        ExcerptSource::Sentences,
        take_sentences(&clean, options.sentence_count),
    )
}

/// Teaser body with the configured stripping applied, without link or wrapper.
pub fn excerpt_text(post: &Post, options: &ExcerptOptions, view: View) -> String {
    let (_, body) = excerpt_source(post, options, view);
    strip_body(&body, options)
}

fn strip_body(body: &str, options: &ExcerptOptions) -> String {
    let body = if options.strip_shortcodes {
        options.shortcode_set().strip(body)
    } else {
        body.to_string()
    };
    if options.strip_tags {
        strip_tags(&body)
    } else {
        body
    }
}

/// Build the teaser paragraph for a post.
///
/// The body is stripped according to `options`, followed by the "read more"
/// link (which survives stripping), and wrapped in `<p>`.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use newsdesk_excerpt::excerpt::{build_excerpt, ExcerptOptions};
/// use newsdesk_excerpt::types::{Author, Post, View};
///
/// let post = Post::new(7, "Vote", "https://news.example/vote", Utc::now(), Author::new("Ann", "ann"))
///     .with_content("<p>Polls close at 8. Turnout is high. Results follow.</p>");
/// let options = ExcerptOptions { sentence_count: 2, use_more: false, ..ExcerptOptions::default() };
///
/// assert_eq!(
///     build_excerpt(&post, &options, View::Archive),
///     "<p>Polls close at 8. Turnout is high.</p>"
/// );
/// ```
pub fn build_excerpt(post: &Post, options: &ExcerptOptions, view: View) -> String {
    let (source, body) = excerpt_source(post, options, view);
    let mut output = strip_body(&body, options);

    let link_text = match source {
        ExcerptSource::MoreTag if options.use_more => more_marker(&post.content)
            .and_then(|(_, custom)| custom)
            .or_else(|| options.more_text()),
        _ => options.more_text(),
    };
    if let Some(text) = link_text.map(escape_html) {
        let link = match source {
            ExcerptSource::MoreTag => format!(
                r#"<a href="{}#more-{}" class="more-link">{text}</a>"#,
                escape_attr(&post.permalink),
                post.id
            ),
            ExcerptSource::Custom | ExcerptSource::Sentences => {
                format!(r#"<a href="{}">{text}</a>"#, escape_attr(&post.permalink))
            }
        };
        if !output.is_empty() {
            output.push(' ');
        }
        output.push_str(&link);
    }

    tracing::debug!(post_id = post.id, source = ?source, "Built excerpt");
    format!("<p>{output}</p>")
}
