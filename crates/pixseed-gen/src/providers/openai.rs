//! OpenAI image generation provider
//!
//! Generates images via the DALL-E 3 endpoint. The API returns a JSON
//! object carrying an image URL, which is fetched in a second request.
//! DALL-E only supports three fixed sizes, so requested dimensions snap
//! to the nearest supported aspect.

use crate::config::PixseedConfig;
use crate::net;
use crate::provider::*;
use pixseed_catalog::AssetSpec;
use pixseed_core::{PixseedError, Result};

const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/images/generations";

/// OpenAI DALL-E provider (requires `PIXSEED_OPENAI_API_KEY`)
#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: String,
    api_url: String,
}

impl OpenAiProvider {
    /// Create a new OpenAiProvider from config
    pub fn from_config(config: &PixseedConfig) -> Result<Self> {
        let api_key = config
            .api_key("openai")
            .ok_or_else(|| {
                PixseedError::ConfigError(
                    "OpenAI API key not configured. Set PIXSEED_OPENAI_API_KEY or add to .pixseed/config.toml".to_string(),
                )
            })?
            .to_string();

        let api_url = config
            .api_url("openai")
            .unwrap_or(DEFAULT_OPENAI_URL)
            .to_string();

        Ok(Self { api_key, api_url })
    }
}

/// Snap requested dimensions to a size DALL-E 3 supports
pub fn snap_size(width: u32, height: u32) -> &'static str {
    if width > height {
        "1792x1024"
    } else if height > width {
        "1024x1792"
    } else {
        "1024x1024"
    }
}

fn extract_image_url(response: &serde_json::Value) -> std::result::Result<String, ProviderError> {
    response
        .get("data")
        .and_then(|d| d.as_array())
        .and_then(|arr| arr.first())
        .and_then(|img| img.get("url"))
        .and_then(|u| u.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ProviderError::UnexpectedShape(format!(
                "no image URL in response: {}",
                serde_json::to_string(response).unwrap_or_default()
            ))
        })
}

/// Parse an OpenAI generation response for testing
pub fn parse_openai_response(json: &str) -> std::result::Result<String, ProviderError> {
    let response: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ProviderError::UnexpectedShape(format!("invalid JSON: {}", e)))?;
    extract_image_url(&response)
}

impl AcquireProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Synchronous
    }

    fn health_check(&self) -> ProviderStatus {
        if self.api_key.is_empty() {
            return ProviderStatus::NoApiKey;
        }
        ProviderStatus::Available
    }

    fn acquire(&self, spec: &AssetSpec) -> std::result::Result<Vec<u8>, ProviderError> {
        let payload = serde_json::json!({
            "model": "dall-e-3",
            "prompt": spec.descriptor(),
            "size": snap_size(spec.width, spec.height),
            "quality": "hd",
            "n": 1,
        });

        let (_status, response) = net::post_json(&self.api_url, Some(&self.api_key), &payload)?;
        let image_url = extract_image_url(&response)?;

        net::get_bytes(&image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_openai_response() {
        let json = r#"{
            "created": 1700000000,
            "data": [
                {
                    "url": "https://example.com/generated.png",
                    "revised_prompt": "A professional portrait..."
                }
            ]
        }"#;

        let url = parse_openai_response(json).unwrap();
        assert_eq!(url, "https://example.com/generated.png");
    }

    #[test]
    fn test_parse_openai_response_invalid() {
        let json = r#"{"error": {"message": "billing hard limit reached"}}"#;
        let err = parse_openai_response(json).unwrap_err();
        assert!(matches!(err, ProviderError::UnexpectedShape(_)));
    }

    #[test]
    fn test_snap_size() {
        assert_eq!(snap_size(400, 400), "1024x1024");
        assert_eq!(snap_size(1920, 1080), "1792x1024");
        assert_eq!(snap_size(1600, 900), "1792x1024");
        assert_eq!(snap_size(900, 1600), "1024x1792");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        std::env::remove_var("PIXSEED_OPENAI_API_KEY");
        let config = PixseedConfig::default();
        let err = OpenAiProvider::from_config(&config).unwrap_err();
        assert!(matches!(err, PixseedError::ConfigError(_)));
    }
}
