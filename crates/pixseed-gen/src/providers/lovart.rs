//! Lovart image generation provider
//!
//! Lovart supports both delivery modes: a submission can complete
//! immediately (200 with an inline image URL) or be accepted for
//! asynchronous processing (202 with a task id), in which case the task
//! status endpoint is polled at a fixed interval until it reports
//! `completed` and a result URL.

use crate::config::PixseedConfig;
use crate::net;
use crate::poller::{poll_task, TaskHandle, TaskPoll};
use crate::provider::*;
use pixseed_catalog::AssetSpec;
use pixseed_core::{PixseedError, Result};
use std::time::Duration;

const DEFAULT_LOVART_URL: &str = "https://api.lovart.ai/v1";

/// Lovart provider (requires `PIXSEED_LOVART_API_KEY`)
#[derive(Debug)]
pub struct LovartProvider {
    api_key: String,
    api_url: String,
    poll_max_attempts: u32,
    poll_interval: Duration,
}

/// What a submission response resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The image was generated inline; fetch this URL
    Inline(String),
    /// The task was accepted; poll this handle
    Accepted(TaskHandle),
}

impl LovartProvider {
    /// Create a new LovartProvider from config
    pub fn from_config(config: &PixseedConfig) -> Result<Self> {
        let api_key = config
            .api_key("lovart")
            .ok_or_else(|| {
                PixseedError::ConfigError(
                    "Lovart API key not configured. Set PIXSEED_LOVART_API_KEY or add to .pixseed/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("lovart")
            .unwrap_or(DEFAULT_LOVART_URL)
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            poll_max_attempts: config.acquisition.poll_max_attempts,
            poll_interval: Duration::from_secs(config.acquisition.poll_interval_secs),
        })
    }

    fn submit(&self, spec: &AssetSpec) -> std::result::Result<SubmitOutcome, ProviderError> {
        let payload = serde_json::json!({
            "prompt": spec.descriptor(),
            "width": spec.width,
            "height": spec.height,
            "num_images": 1,
        });

        let url = format!("{}/images/generations", self.api_url);
        let (status, response) = net::post_json(&url, Some(&self.api_key), &payload)?;
        parse_lovart_submit(status, &response)
    }

    fn fetch_status(&self, task_id: &str) -> TaskPoll {
        let url = format!("{}/tasks/{}", self.api_url, task_id);
        match net::get_json(&url, Some(&self.api_key)) {
            Ok(response) => parse_lovart_status(&response),
            // A failed status query is transient; the attempt bound
            // still terminates the loop
            Err(_) => TaskPoll::Malformed,
        }
    }
}

/// Interpret a submission response by status code
pub fn parse_lovart_submit(
    status: u16,
    response: &serde_json::Value,
) -> std::result::Result<SubmitOutcome, ProviderError> {
    match status {
        202 => {
            let task_id = response
                .get("task_id")
                .or_else(|| response.get("id"))
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    ProviderError::UnexpectedShape("202 response without task id".to_string())
                })?;
            Ok(SubmitOutcome::Accepted(TaskHandle::new(task_id)))
        }
        _ => {
            // Inline result; the URL field name varies between API versions
            let url = response
                .get("data")
                .and_then(|d| d.as_array())
                .and_then(|arr| arr.first())
                .and_then(|img| img.get("url").or_else(|| img.get("image_url")))
                .and_then(|u| u.as_str())
                .or_else(|| response.get("url").and_then(|u| u.as_str()))
                .or_else(|| response.get("image_url").and_then(|u| u.as_str()))
                .ok_or_else(|| {
                    ProviderError::UnexpectedShape(format!(
                        "no image URL in response: {}",
                        serde_json::to_string(response).unwrap_or_default()
                    ))
                })?;
            Ok(SubmitOutcome::Inline(url.to_string()))
        }
    }
}

/// Interpret one task-status response
pub fn parse_lovart_status(response: &serde_json::Value) -> TaskPoll {
    let status = match response.get("status").and_then(|s| s.as_str()) {
        Some(s) => s,
        None => return TaskPoll::Malformed,
    };

    match status {
        "completed" => {
            let url = response
                .get("result")
                .and_then(|r| r.get("url"))
                .and_then(|u| u.as_str())
                .or_else(|| response.get("image_url").and_then(|u| u.as_str()));
            match url {
                Some(u) => TaskPoll::Completed { url: u.to_string() },
                None => TaskPoll::Malformed,
            }
        }
        "failed" => {
            let message = response
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("unknown error")
                .to_string();
            TaskPoll::Failed { message }
        }
        _ => TaskPoll::Pending,
    }
}

impl AcquireProvider for LovartProvider {
    fn name(&self) -> &str {
        "lovart"
    }

    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Asynchronous
    }

    fn health_check(&self) -> ProviderStatus {
        if self.api_key.is_empty() {
            return ProviderStatus::NoApiKey;
        }
        ProviderStatus::Available
    }

    fn acquire(&self, spec: &AssetSpec) -> std::result::Result<Vec<u8>, ProviderError> {
        let result_url = match self.submit(spec)? {
            SubmitOutcome::Inline(url) => url,
            SubmitOutcome::Accepted(handle) => {
                eprintln!("  lovart task accepted: {}", handle.id);
                poll_task(&handle, self.poll_max_attempts, self.poll_interval, |id| {
                    self.fetch_status(id)
                })?
            }
        };

        net::get_bytes(&result_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit_inline_data_array() {
        let json: serde_json::Value = serde_json::from_str(
            r#"{"data": [{"url": "https://cdn.lovart.ai/img/abc.png"}]}"#,
        )
        .unwrap();
        let outcome = parse_lovart_submit(200, &json).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Inline("https://cdn.lovart.ai/img/abc.png".to_string())
        );
    }

    #[test]
    fn test_parse_submit_inline_flat_url() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"image_url": "https://cdn.lovart.ai/img/x.png"}"#).unwrap();
        let outcome = parse_lovart_submit(200, &json).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Inline("https://cdn.lovart.ai/img/x.png".to_string())
        );
    }

    #[test]
    fn test_parse_submit_accepted() {
        let json: serde_json::Value = serde_json::from_str(r#"{"task_id": "t1"}"#).unwrap();
        let outcome = parse_lovart_submit(202, &json).unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted(TaskHandle::new("t1")));

        // "id" field also accepted
        let json: serde_json::Value = serde_json::from_str(r#"{"id": "t2"}"#).unwrap();
        let outcome = parse_lovart_submit(202, &json).unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted(TaskHandle::new("t2")));
    }

    #[test]
    fn test_parse_submit_unknown_shape() {
        let json: serde_json::Value = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(parse_lovart_submit(200, &json).is_err());
        assert!(parse_lovart_submit(202, &json).is_err());
    }

    #[test]
    fn test_parse_status_responses() {
        let pending: serde_json::Value =
            serde_json::from_str(r#"{"status": "pending"}"#).unwrap();
        assert_eq!(parse_lovart_status(&pending), TaskPoll::Pending);

        let completed: serde_json::Value =
            serde_json::from_str(r#"{"status": "completed", "result": {"url": "http://x/img.bin"}}"#)
                .unwrap();
        assert_eq!(
            parse_lovart_status(&completed),
            TaskPoll::Completed {
                url: "http://x/img.bin".to_string()
            }
        );

        let failed: serde_json::Value =
            serde_json::from_str(r#"{"status": "failed", "error": "nsfw"}"#).unwrap();
        assert_eq!(
            parse_lovart_status(&failed),
            TaskPoll::Failed {
                message: "nsfw".to_string()
            }
        );

        let garbage: serde_json::Value = serde_json::from_str(r#"{"weird": 1}"#).unwrap();
        assert_eq!(parse_lovart_status(&garbage), TaskPoll::Malformed);
    }

    // 202 submit-then-poll: first two polls pending, third completed,
    // exactly 3 status fetches.
    #[test]
    fn test_accepted_task_polls_to_completion() {
        let json: serde_json::Value = serde_json::from_str(r#"{"task_id": "t1"}"#).unwrap();
        let handle = match parse_lovart_submit(202, &json).unwrap() {
            SubmitOutcome::Accepted(h) => h,
            other => panic!("expected accepted task, got {:?}", other),
        };

        let responses = [
            r#"{"status": "pending"}"#,
            r#"{"status": "pending"}"#,
            r#"{"status": "completed", "result": {"url": "http://x/img.bin"}}"#,
        ];
        let mut calls = 0;

        let url = poll_task(&handle, 60, Duration::ZERO, |_| {
            let response: serde_json::Value = serde_json::from_str(responses[calls]).unwrap();
            calls += 1;
            parse_lovart_status(&response)
        })
        .unwrap();

        assert_eq!(url, "http://x/img.bin");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        std::env::remove_var("PIXSEED_LOVART_API_KEY");
        let config = PixseedConfig::default();
        let err = LovartProvider::from_config(&config).unwrap_err();
        assert!(matches!(err, PixseedError::ConfigError(_)));
    }
}
