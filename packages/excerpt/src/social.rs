//! Share bar markup for article pages.

use serde::{Deserialize, Serialize};

use crate::markup::escape_attr;
use crate::types::Post;

/// Which share utilities appear under an article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleUtilities {
    /// Tweet button.
    pub twitter: bool,

    /// Facebook like/recommend button.
    pub facebook: bool,

    /// ShareThis widget.
    pub sharethis: bool,

    /// E-mail this article.
    pub email: bool,

    /// Print link.
    pub print: bool,
}

/// Share bar settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialSettings {
    /// Enabled utilities.
    pub article_utilities: ArticleUtilities,

    /// The site's twitter profile URL; its username becomes `data-via`.
    pub twitter_link: String,

    /// Show the tweet counter.
    pub show_twitter_count: bool,

    /// Facebook button verb ("like" or "recommend").
    pub fb_verb: String,
}

impl Default for SocialSettings {
    fn default() -> Self {
        Self {
            article_utilities: ArticleUtilities::default(),
            twitter_link: String::new(),
            show_twitter_count: true,
            fb_verb: "like".to_string(),
        }
    }
}

/// Extract the username from a twitter profile URL.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::social::twitter_url_to_username;
///
/// assert_eq!(twitter_url_to_username("https://twitter.com/newsdesk"), "newsdesk");
/// assert_eq!(twitter_url_to_username("https://twitter.com/#!/newsdesk/"), "newsdesk");
/// assert_eq!(twitter_url_to_username("@newsdesk"), "newsdesk");
/// ```
pub fn twitter_url_to_username(url: &str) -> String {
    url.trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or_default()
        .replace('@', "")
}

fn twitter_button(post: &Post, settings: &SocialSettings) -> String {
    let mut attrs = vec![
        format!(r#"data-url="{}""#, escape_attr(&post.permalink)),
        format!(r#"data-text="{}""#, escape_attr(&post.title)),
    ];
    if !settings.twitter_link.is_empty() {
        attrs.push(format!(
            r#"data-via="{}""#,
            escape_attr(&twitter_url_to_username(&settings.twitter_link))
        ));
    }
    if let Some(handle) = post.author.twitter.as_deref().filter(|h| !h.is_empty()) {
        attrs.push(format!(
            r#"data-related="{}:Follow the author of this article""#,
            escape_attr(handle.trim_start_matches('@'))
        ));
    }
    if !settings.show_twitter_count {
        attrs.push(r#"data-count="none""#.to_string());
    }

    format!(
        r#"<span class="twitter"><a href="https://twitter.com/share" class="twitter-share-button" {}>Tweet</a></span>"#,
        attrs.join(" ")
    )
}

fn facebook_button(post: &Post, settings: &SocialSettings) -> String {
    format!(
        r#"<span class="facebook"><fb:like href="{}" send="false" layout="button_count" show_faces="false" action="{}"></fb:like></span>"#,
        escape_attr(&post.permalink),
        escape_attr(&settings.fb_verb)
    )
}

/// Share bar for an article: twitter and facebook on the left, sharethis,
/// e-mail and print on the right. Disabled utilities are left out.
pub fn social_links(post: &Post, settings: &SocialSettings) -> String {
    let utilities = settings.article_utilities;
    let mut output = String::from(r#"<div class="post-social clearfix"><div class="left">"#);

    if utilities.twitter {
        output.push_str(&twitter_button(post, settings));
    }
    if utilities.facebook {
        output.push_str(&facebook_button(post, settings));
    }

    output.push_str(r#"</div><div class="right">"#);

    if utilities.sharethis {
        output.push_str(r#"<span class="st_sharethis" displayText="Share"></span>"#);
    }
    if utilities.email {
        output.push_str(r#"<span class="st_email" displayText="Email"></span>"#);
    }
    if utilities.print {
        output.push_str(r##"<span class="print"><a href="#" onclick="window.print()" title="print this article" rel="nofollow"><i class="icon-print"></i> Print</a></span>"##);
    }

    output.push_str("</div></div>");
    output
}
