//! Shared HTTP plumbing for remote providers
//!
//! Every request gets a fresh agent with a global timeout, and transient
//! transport failures are retried a bounded number of times with
//! exponential backoff. Retries here cover one provider attempt; falling
//! back to a different provider is the orchestrator's job.

use crate::provider::ProviderError;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_RETRIES: usize = 3;
const RETRY_BASE_DELAY_MS: u64 = 500;

fn build_agent() -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build();
    config.into()
}

fn is_retryable_error(e: &ureq::Error) -> bool {
    match e {
        ureq::Error::Timeout(_)
        | ureq::Error::Io(_)
        | ureq::Error::ConnectionFailed
        | ureq::Error::HostNotFound => true,
        ureq::Error::StatusCode(code) => matches!(code, 429 | 500 | 502 | 503 | 504),
        _ => false,
    }
}

fn sleep_backoff(attempt: usize) {
    let delay_ms = RETRY_BASE_DELAY_MS.saturating_mul(1u64 << attempt);
    std::thread::sleep(Duration::from_millis(delay_ms));
}

fn classify(e: ureq::Error) -> ProviderError {
    match e {
        ureq::Error::StatusCode(401) | ureq::Error::StatusCode(403) => {
            ProviderError::Unauthenticated
        }
        ureq::Error::StatusCode(429) => ProviderError::RateLimited,
        ureq::Error::StatusCode(code) => ProviderError::Http(code),
        other => ProviderError::Transport(other.to_string()),
    }
}

/// GET a binary body (image download)
pub(crate) fn get_bytes(url: &str) -> Result<Vec<u8>, ProviderError> {
    for attempt in 0..MAX_RETRIES {
        let agent = build_agent();
        match agent.get(url).call() {
            Ok(ok) => {
                let mut reader = ok.into_body().into_reader();
                let mut bytes = Vec::new();
                std::io::Read::read_to_end(&mut reader, &mut bytes)
                    .map_err(|e| ProviderError::Transport(format!("reading body: {}", e)))?;
                return Ok(bytes);
            }
            Err(e) => {
                if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) {
                    sleep_backoff(attempt);
                    continue;
                }
                return Err(classify(e));
            }
        }
    }

    Err(ProviderError::Transport(
        "request failed after retries".to_string(),
    ))
}

/// GET a JSON body, optionally with a bearer token
pub(crate) fn get_json(
    url: &str,
    bearer: Option<&str>,
) -> Result<serde_json::Value, ProviderError> {
    for attempt in 0..MAX_RETRIES {
        let agent = build_agent();
        let mut request = agent.get(url);
        if let Some(token) = bearer {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        match request.call() {
            Ok(mut ok) => {
                return ok
                    .body_mut()
                    .read_json()
                    .map_err(|e| ProviderError::UnexpectedShape(format!("parsing JSON: {}", e)));
            }
            Err(e) => {
                if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) {
                    sleep_backoff(attempt);
                    continue;
                }
                return Err(classify(e));
            }
        }
    }

    Err(ProviderError::Transport(
        "request failed after retries".to_string(),
    ))
}

/// POST a JSON payload, returning the status code alongside the parsed
/// body so callers can distinguish immediate results (200) from accepted
/// submissions (202).
pub(crate) fn post_json(
    url: &str,
    bearer: Option<&str>,
    payload: &serde_json::Value,
) -> Result<(u16, serde_json::Value), ProviderError> {
    for attempt in 0..MAX_RETRIES {
        let agent = build_agent();
        let mut request = agent.post(url).header("Content-Type", "application/json");
        if let Some(token) = bearer {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        match request.send_json(payload) {
            Ok(mut ok) => {
                let status = ok.status().as_u16();
                let body = ok
                    .body_mut()
                    .read_json()
                    .map_err(|e| ProviderError::UnexpectedShape(format!("parsing JSON: {}", e)))?;
                return Ok((status, body));
            }
            Err(e) => {
                if attempt + 1 < MAX_RETRIES && is_retryable_error(&e) {
                    sleep_backoff(attempt);
                    continue;
                }
                return Err(classify(e));
            }
        }
    }

    Err(ProviderError::Transport(
        "request failed after retries".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_errors() {
        assert!(matches!(
            classify(ureq::Error::StatusCode(401)),
            ProviderError::Unauthenticated
        ));
        assert!(matches!(
            classify(ureq::Error::StatusCode(403)),
            ProviderError::Unauthenticated
        ));
    }

    #[test]
    fn test_classify_rate_limit_and_http() {
        assert!(matches!(
            classify(ureq::Error::StatusCode(429)),
            ProviderError::RateLimited
        ));
        assert!(matches!(
            classify(ureq::Error::StatusCode(404)),
            ProviderError::Http(404)
        ));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_error(&ureq::Error::StatusCode(503)));
        assert!(!is_retryable_error(&ureq::Error::StatusCode(404)));
        assert!(!is_retryable_error(&ureq::Error::StatusCode(401)));
    }
}
