//! Configuration constants, site settings and validation functions.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ExcerptError, Result};
use crate::excerpt::ExcerptOptions;
use crate::social::SocialSettings;

/// Number of sentences kept in a teaser when nothing else is configured.
pub const DEFAULT_SENTENCE_COUNT: usize = 5;

/// Upper bound for sentence counts accepted from user input.
pub const MAX_SENTENCE_COUNT: usize = 100;

/// Posts younger than this (in seconds) show "time ago" instead of a date.
pub const TIME_AGO_THRESHOLD_SECS: i64 = 86_400;

/// Base URL of the gravatar service.
pub const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com";

/// HTTP timeout in seconds.
///
/// Avatar probes are tiny HEAD requests, so this stays short.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Default wrap width for CLI text output.
pub const TEXT_WRAP_WIDTH: usize = 80;

/// Loose e-mail shape: something, an at-sign, something, no whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid regex"));

/// Validate an e-mail address before hashing it for a gravatar lookup.
///
/// Surrounding whitespace is ignored, matching how the address is hashed.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::config::validate_email;
///
/// assert!(validate_email("editor@example.org").is_ok());
/// assert!(validate_email(" editor@example.org ").is_ok());
/// assert!(validate_email("editor").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_PATTERN.is_match(email.trim()) {
        Ok(())
    } else {
        Err(ExcerptError::InvalidEmail(email.to_string()))
    }
}

/// Validate a sentence count supplied by a user.
///
/// The trimming functions themselves accept any count (zero yields an empty
/// teaser); this is for surfaces where zero or huge values are a mistake.
pub fn validate_sentence_count(count: usize) -> Result<()> {
    if (1..=MAX_SENTENCE_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(ExcerptError::InvalidSentenceCount {
            count,
            max: MAX_SENTENCE_COUNT,
        })
    }
}

/// Build the gravatar probe URL for an address hash.
///
/// `d=404` makes the service answer 404 instead of a placeholder image when
/// no avatar exists.
pub fn gravatar_url(base_url: &str, hash: &str) -> String {
    format!("{}/avatar/{hash}?d=404", base_url.trim_end_matches('/'))
}

/// Where the "clean read" toggle is rendered, if anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanRead {
    /// No clean-read link.
    #[default]
    Disabled,

    /// Appended to the byline on single post views.
    Byline,

    /// Rendered by the footer template (outside this crate).
    Footer,
}

/// Site-wide appearance settings relevant to teaser rendering.
///
/// Loaded from a YAML document; every field has a default so partial files
/// are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Excerpt defaults.
    pub excerpt: ExcerptOptions,

    /// Share bar configuration.
    pub social: SocialSettings,

    /// Clean-read link placement.
    pub clean_read: CleanRead,
}

impl Settings {
    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        let settings = Self::from_yaml(&yaml)?;
        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }
}
