//! HTTP client wrapper for avatar probes.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{ExcerptError, Result};

/// User agent string identifying this tool.
const USER_AGENT: &str = concat!("newsdesk-excerpt/", env!("CARGO_PKG_VERSION"));

/// Maximum number of attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 250;

/// Create a configured HTTP client.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Send a HEAD request and return the response status.
///
/// Server errors (5xx) and connection/timeout failures are retried with
/// exponential backoff. Any other status, including 4xx, is returned as-is
/// since the caller decides what it means.
pub fn head_status(client: &Client, url: &str) -> Result<StatusCode> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // 250ms, 500ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.head(url).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }
                return Ok(status);
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                return Err(ExcerptError::Http(e));
            }
        }
    }

    Err(ExcerptError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        assert!(create_client().is_ok());
    }

    #[test]
    fn test_user_agent_mentions_crate() {
        assert!(USER_AGENT.starts_with("newsdesk-excerpt/"));
    }
}
