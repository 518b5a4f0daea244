//! placeholder.com labelled placeholder provider
//!
//! Keyless service rendering a grey box with the asset's caption:
//! `GET https://via.placeholder.com/{w}x{h}.jpg/666666/ffffff?text=...`

use crate::config::PixseedConfig;
use crate::net;
use crate::provider::*;
use pixseed_catalog::AssetSpec;

const DEFAULT_PLACEHOLDER_URL: &str = "https://via.placeholder.com";

/// placeholder.com provider (no authentication)
pub struct PlaceholderProvider {
    base_url: String,
}

impl PlaceholderProvider {
    pub fn from_config(config: &PixseedConfig) -> Self {
        let base_url = config
            .api_url("placeholder")
            .unwrap_or(DEFAULT_PLACEHOLDER_URL)
            .to_string();
        Self { base_url }
    }

    fn image_url(&self, spec: &AssetSpec) -> String {
        // The service only needs spaces escaped; '+' is its convention
        let text = spec.caption().replace(' ', "+");
        format!(
            "{}/{}x{}.jpg/666666/ffffff?text={}",
            self.base_url, spec.width, spec.height, text
        )
    }
}

impl AcquireProvider for PlaceholderProvider {
    fn name(&self) -> &str {
        "placeholder"
    }

    fn protocol(&self) -> ProtocolKind {
        ProtocolKind::Synchronous
    }

    fn health_check(&self) -> ProviderStatus {
        ProviderStatus::Available
    }

    fn acquire(&self, spec: &AssetSpec) -> Result<Vec<u8>, ProviderError> {
        net::get_bytes(&self.image_url(spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_uses_label() {
        let provider = PlaceholderProvider::from_config(&PixseedConfig::default());
        let spec = AssetSpec {
            id: "product-ppt.jpg".to_string(),
            width: 1600,
            height: 900,
            prompt: String::new(),
            search: String::new(),
            label: "PPT Template".to_string(),
        };
        assert_eq!(
            provider.image_url(&spec),
            "https://via.placeholder.com/1600x900.jpg/666666/ffffff?text=PPT+Template"
        );
    }

    #[test]
    fn test_image_url_falls_back_to_id_stem() {
        let provider = PlaceholderProvider::from_config(&PixseedConfig::default());
        let spec = AssetSpec {
            id: "about-story.jpg".to_string(),
            width: 1920,
            height: 1080,
            prompt: String::new(),
            search: String::new(),
            label: String::new(),
        };
        assert!(provider.image_url(&spec).ends_with("?text=about-story"));
    }
}
