//! Core data types: posts, authors and custom bylines.
//!
//! These are plain values handed in by the caller; nothing here looks up
//! "the current post" on its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of page a fragment is rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// The front page listing.
    Home,

    /// Any other listing (category, tag, search, author).
    #[default]
    Archive,

    /// A single post page.
    Single,
}

/// A post author (or co-author).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Public display name.
    pub display_name: String,

    /// Login / URL slug.
    pub login: String,

    /// E-mail address, used for gravatar lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Twitter handle without the `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    /// Organization shown after a co-author's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// Author archive URL. Derived from the login when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_url: Option<String>,
}

impl Author {
    /// Create an author with a display name and login.
    pub fn new(display_name: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            login: login.into(),
            ..Self::default()
        }
    }

    /// URL of the page listing this author's posts.
    #[must_use]
    pub fn posts_url(&self) -> String {
        self.archive_url
            .clone()
            .unwrap_or_else(|| format!("/author/{}/", self.login))
    }
}

/// Byline text entered by an editor in place of the author name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomByline {
    /// Text shown as the author.
    pub text: String,

    /// Optional link for the byline text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post identifier.
    pub id: u64,

    /// Post title.
    pub title: String,

    /// Canonical URL.
    pub permalink: String,

    /// Full content, possibly with markup, shortcodes and a `<!--more-->` marker.
    #[serde(default)]
    pub content: String,

    /// Hand-written excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Publication time.
    pub published: DateTime<Utc>,

    /// Primary author.
    pub author: Author,

    /// Co-authors, in display order. When non-empty they replace the author.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coauthors: Vec<Author>,

    /// Custom byline overriding the author(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byline: Option<CustomByline>,

    /// Editor link, present when the viewer may edit the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<String>,
}

impl Post {
    /// Create a post with the required fields; everything else is empty.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        permalink: impl Into<String>,
        published: DateTime<Utc>,
        author: Author,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            permalink: permalink.into(),
            content: String::new(),
            excerpt: None,
            published,
            author,
            coauthors: Vec::new(),
            byline: None,
            edit_link: None,
        }
    }

    /// Set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set a hand-written excerpt.
    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// The hand-written excerpt, if one was entered.
    ///
    /// Blank excerpts count as absent.
    #[must_use]
    pub fn custom_excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// Parse a post from YAML.
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}
