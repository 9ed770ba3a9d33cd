//! Gravatar existence checks with an in-memory result cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::blocking::Client;
use reqwest::StatusCode;
use sha2::{Digest, Sha256};

use crate::config::{gravatar_url, validate_email, GRAVATAR_BASE_URL};
use crate::error::{ExcerptError, Result};
use crate::http::{create_client, head_status};

/// Hash an e-mail address the way the gravatar service expects.
///
/// # Examples
/// ```
/// use newsdesk_excerpt::gravatar::gravatar_hash;
///
/// assert_eq!(gravatar_hash(" Editor@Example.org "), gravatar_hash("editor@example.org"));
/// assert_eq!(gravatar_hash("editor@example.org").len(), 64);
/// ```
pub fn gravatar_hash(email: &str) -> String {
    hex::encode(Sha256::digest(email.trim().to_lowercase().as_bytes()))
}

/// Cache key for a hashed address.
pub fn cache_key(hash: &str) -> String {
    format!("has_gravatar_{hash}")
}

/// Checks whether addresses have a gravatar, remembering every answer.
///
/// Lookups are HEAD requests with `d=404`, so a missing avatar answers 404
/// instead of a placeholder image. Only definite answers are cached; transport
/// failures are returned and retried on the next call.
#[derive(Debug)]
pub struct GravatarChecker {
    client: Client,
    base_url: String,
    cache: Mutex<HashMap<String, bool>>,
}

impl GravatarChecker {
    /// Checker against the public gravatar service.
    pub fn new() -> Result<Self> {
        Self::with_base_url(GRAVATAR_BASE_URL)
    }

    /// Checker against another host (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            base_url: base_url.into(),
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, bool>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached answer for an address, without touching the network.
    pub fn cached(&self, email: &str) -> Option<bool> {
        self.cache()
            .get(&cache_key(&gravatar_hash(email)))
            .copied()
    }

    /// Whether the address has a gravatar.
    pub fn has_gravatar(&self, email: &str) -> Result<bool> {
        validate_email(email)?;
        let hash = gravatar_hash(email);
        let key = cache_key(&hash);

        if let Some(&found) = self.cache().get(&key) {
            tracing::debug!(hash = %hash, found, "Gravatar cache hit");
            return Ok(found);
        }

        let url = gravatar_url(&self.base_url, &hash);
        let status = head_status(&self.client, &url).map_err(|source| {
            ExcerptError::GravatarLookup {
                hash: hash.clone(),
                source: Box::new(source),
            }
        })?;
        let found = status == StatusCode::OK;
        tracing::debug!(hash = %hash, status = %status, found, "Gravatar lookup");

        self.cache().insert(key, found);
        Ok(found)
    }

    /// Number of cached answers.
    pub fn cache_len(&self) -> usize {
        self.cache().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravatar_hash_known_value() {
        // sha256("test@example.com")
        assert_eq!(
            gravatar_hash("Test@Example.com"),
            "973dfe463ec85785f5f95af5ba3906eedb2d931c24e69824a89ea65dba4e813b"
        );
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("abc"), "has_gravatar_abc");
    }

    #[test]
    fn test_invalid_email_is_rejected_before_lookup() {
        let checker = GravatarChecker::with_base_url("http://127.0.0.1:9").unwrap();
        let err = checker.has_gravatar("not-an-address").unwrap_err();
        assert!(matches!(err, ExcerptError::InvalidEmail(_)));
        assert_eq!(checker.cache_len(), 0);
    }

    #[test]
    fn test_cached_is_empty_initially() {
        let checker = GravatarChecker::with_base_url("http://127.0.0.1:9").unwrap();
        assert_eq!(checker.cached("a@b.c"), None);
    }
}
