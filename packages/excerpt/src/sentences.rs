//! Abbreviation-aware sentence splitting.
//!
//! A sentence ends at a run of whitespace that follows `.`, `!` or `?`
//! (optionally followed by one closing quote), unless the text just before
//! the whitespace ends in a known abbreviation, a personal-name initial
//! ("W.") or a two-letter abbreviation ("O.H.").

use crate::markup::clean_text;

/// Titles and abbreviations whose trailing period never ends a sentence.
///
/// Matched case-insensitively, and only as whole words.
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Mr.", "Mrs.", "Ms.", "Jr.", "Dr.", "Prof.", "Sr.", "Rep.", "Sen.", "Gov.", "Pres.", "U.S.",
    "Rev.", "Gen.", "Capt.", "Lt.", "Cpl.", "Inc.",
];

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '\u{2019}' | '\u{201d}' | '\u{00bb}')
}

fn leading_whitespace_len(text: &str) -> usize {
    text.find(|c: char| !c.is_whitespace()).unwrap_or(text.len())
}

/// Check whether `prefix` (text up to a candidate boundary) ends in an
/// abbreviation rather than the end of a sentence.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::sentences::ends_with_abbreviation;
///
/// assert!(ends_with_abbreviation("Ask Dr."));
/// assert!(ends_with_abbreviation("George W."));
/// assert!(ends_with_abbreviation("Columbus, O.H."));
/// assert!(!ends_with_abbreviation("Went home."));
/// ```
pub fn ends_with_abbreviation(prefix: &str) -> bool {
    if !prefix.ends_with('.') {
        return false;
    }
    ends_with_title(prefix) || ends_with_initial(prefix) || ends_with_two_letter(prefix)
}

fn ends_with_title(prefix: &str) -> bool {
    TITLE_ABBREVIATIONS.iter().any(|title| {
        let Some(start) = prefix.len().checked_sub(title.len()) else {
            return false;
        };
        let Some(tail) = prefix.get(start..) else {
            return false;
        };
        tail.eq_ignore_ascii_case(title)
            && prefix[..start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Whitespace, one capital letter, period.
fn ends_with_initial(prefix: &str) -> bool {
    let mut rev = prefix.chars().rev();
    matches!(
        (rev.next(), rev.next(), rev.next()),
        (Some('.'), Some(letter), Some(space)) if letter.is_uppercase() && space.is_whitespace()
    )
}

/// Capital, period, capital, period.
fn ends_with_two_letter(prefix: &str) -> bool {
    let mut rev = prefix.chars().rev();
    matches!(
        (rev.next(), rev.next(), rev.next(), rev.next()),
        (Some('.'), Some(second), Some('.'), Some(first))
            if first.is_uppercase() && second.is_uppercase()
    )
}

/// Iterator over the sentences of already-clean text.
///
/// Yields trimmed, non-empty slices of the input in order.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    text: &'a str,
    start: usize,
    scan: usize,
}

impl<'a> Sentences<'a> {
    /// Start iterating over `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            start: 0,
            scan: 0,
        }
    }

    /// Find the next accepted boundary at or after the scan position.
    ///
    /// Returns `(sentence_end, next_sentence_start)`.
    fn next_boundary(&mut self) -> Option<(usize, usize)> {
        let text = self.text;
        let scan = self.scan;
        let mut chars = text[scan..]
            .char_indices()
            .map(|(i, c)| (i + scan, c))
            .peekable();

        while let Some((i, c)) = chars.next() {
            if !is_terminal(c) {
                continue;
            }
            let mut end = i + c.len_utf8();
            if let Some(&(_, quote)) = chars.peek() {
                if is_closing_quote(quote) {
                    end += quote.len_utf8();
                }
            }

            let gap = leading_whitespace_len(&text[end..]);
            if gap == 0 || ends_with_abbreviation(&text[..end]) {
                continue;
            }
            return Some((end, end + gap));
        }

        self.scan = text.len();
        None
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.start < self.text.len() {
            let sentence = match self.next_boundary() {
                Some((end, resume)) => {
                    let sentence = &self.text[self.start..end];
                    self.start = resume;
                    self.scan = resume;
                    sentence
                }
                None => {
                    let rest = &self.text[self.start..];
                    self.start = self.text.len();
                    rest
                }
            };

            let sentence = sentence.trim();
            if !sentence.is_empty() {
                return Some(sentence);
            }
        }
        None
    }
}

/// Split clean text (no markup) into sentences.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::sentences::split_sentences;
///
/// assert_eq!(
///     split_sentences("Mr. Lee won. Fans cheered!"),
///     vec!["Mr. Lee won.", "Fans cheered!"]
/// );
/// ```
pub fn split_sentences(text: &str) -> Vec<&str> {
    Sentences::new(text).collect()
}

/// Keep the first `max_sentences` sentences of clean text, joined by one space.
pub fn take_sentences(text: &str, max_sentences: usize) -> String {
    if max_sentences == 0 {
        return String::new();
    }
    Sentences::new(text)
        .take(max_sentences)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim raw content to its first `max_sentences` sentences.
///
/// Markup tags and registered shortcodes are removed before splitting. Never fails:
/// malformed markup or unbalanced quotes are treated as literal text.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::trim_to_sentences;
///
/// assert_eq!(
///     trim_to_sentences("Dr. Smith went home. He was tired.", 1),
///     "Dr. Smith went home."
/// );
/// assert_eq!(trim_to_sentences("<p>Hello world.</p> More text.", 1), "Hello world.");
/// assert_eq!(trim_to_sentences("Anything.", 0), "");
/// ```
pub fn trim_to_sentences(input: &str, max_sentences: usize) -> String {
    if max_sentences == 0 || input.is_empty() {
        return String::new();
    }
    take_sentences(&clean_text(input), max_sentences)
}
