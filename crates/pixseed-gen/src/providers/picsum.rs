//! Picsum Photos stock image provider
//!
//! Keyless service returning a random photo at the requested size:
//! `GET https://picsum.photos/{width}/{height}` responds with the image
//! bytes directly.

use crate::config::PixseedConfig;
use crate::net;
use crate::provider::*;
use pixseed_catalog::AssetSpec;

const DEFAULT_PICSUM_URL: &str = "https://picsum.photos";

/// Picsum Photos provider (no authentication)
pub struct PicsumProvider {
    base_url: String,
}

impl PicsumProvider {
    pub fn from_config(config: &PixseedConfig) -> Self {
        let base_url = config
            .api_url("picsum")
            .unwrap_or(DEFAULT_PICSUM_URL)
            .to_string();
        Self { base_url }
    }

    fn image_url(&self, spec: &AssetSpec) -> String {
        format!("{}/{}/{}", self.base_url, spec.width, spec.height)
    }
}

impl AcquireProvider for PicsumProvider {
    fn name(&self) -> &str {
        "picsum"
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
