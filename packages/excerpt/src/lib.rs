//! Newsdesk excerpt - Sentence-aware teasers for news posts.
//!
//! This crate cuts post content down to its first few sentences without
//! being fooled by abbreviations ("Dr.", "U.S.", "George W. Bush"), and
//! renders the small HTML fragments that go with a teaser: the excerpt
//! paragraph, the byline, the "time ago" stamp and the share bar.
//!
//! # Example
//!
//! ```
//! use newsdesk_excerpt::trim_to_sentences;
//!
//! let text = "<p>Gov. Reyes signed the bill. It takes effect in May. Critics object.</p>";
//! assert_eq!(
//!     trim_to_sentences(text, 2),
//!     "Gov. Reyes signed the bill. It takes effect in May."
//! );
//! ```
//!
//! # Architecture
//!
//! - [`sentences`]: Abbreviation-aware sentence splitting and trimming
//! - [`markup`]: Tag and shortcode stripping, escaping
//! - [`excerpt`]: Teaser paragraphs
//! - [`byline`]: Author links and bylines
//! - [`time`]: "Time ago" and date formatting
//! - [`social`]: Share bar markup
//! - [`gravatar`]: Cached gravatar existence checks
//! - [`config`]: Constants, settings and validation
//! - [`types`]: Posts and authors
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client
//! - [`cli`]: Command-line interface

pub mod byline;
pub mod cli;
pub mod config;
pub mod error;
pub mod excerpt;
pub mod gravatar;
pub mod http;
pub mod markup;
pub mod sentences;
pub mod social;
pub mod time;
pub mod types;

// Re-export main functions
pub use sentences::{split_sentences, trim_to_sentences};

// Re-export commonly used items
pub use config::Settings;
pub use error::{ExcerptError, Result};
pub use excerpt::{build_excerpt, ExcerptOptions};
pub use types::{Author, Post, View};
