//! Provider registry
//!
//! Maps provider names to concrete implementations.

pub mod local;
pub mod lovart;
pub mod openai;
pub mod picsum;
pub mod placeholder;

use crate::config::PixseedConfig;
use crate::provider::AcquireProvider;
use pixseed_core::{PixseedError, Result};

/// Create a provider by name with configuration
pub fn create_provider(name: &str, config: &PixseedConfig) -> Result<Box<dyn AcquireProvider>> {
    match name {
        "picsum" => Ok(Box::new(picsum::PicsumProvider::from_config(config))),
        "placeholder" => Ok(Box::new(placeholder::PlaceholderProvider::from_config(
            config,
        ))),
        "openai" => Ok(Box::new(openai::OpenAiProvider::from_config(config)?)),
        "lovart" => Ok(Box::new(lovart::LovartProvider::from_config(config)?)),
        "local" => Ok(Box::new(local::LocalProvider::new())),
        _ => Err(PixseedError::UnknownProvider(format!(
            "'{}'. Available: {}",
            name,
            available_providers().join(", ")
        ))),
    }
}

/// List all available provider names
pub fn available_providers() -> Vec<&'static str> {
    vec!["picsum", "placeholder", "openai", "lovart", "local"]
}

/// Build the provider chain for a run from the configured fallback order.
///
/// Providers that cannot be constructed (missing credentials, unknown
/// name) or are disabled get reported back and skipped for the whole
/// run; no network activity happens for them. This is deliberately done
/// before any asset is processed.
pub fn build_chain(
    names: &[String],
    config: &PixseedConfig,
) -> (Vec<Box<dyn AcquireProvider>>, Vec<(String, String)>) {
    let mut chain = Vec::new();
    let mut skipped = Vec::new();

    for name in names {
        if !config.is_enabled(name) {
            skipped.push((name.clone(), "disabled in config".to_string()));
            continue;
        }
        match create_provider(name, config) {
            Ok(provider) => chain.push(provider),
            Err(e) => skipped.push((name.clone(), e.to_string())),
        }
    }

    (chain, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_keyless_providers() {
        let config = PixseedConfig::default();
        for name in ["picsum", "placeholder", "local"] {
            let provider = create_provider(name, &config).unwrap();
            assert_eq!(provider.name(), name);
        }
    }

    #[test]
    fn test_unknown_provider() {
        let config = PixseedConfig::default();
        assert!(create_provider("unsplash", &config).is_err());
    }

    #[test]
    fn test_build_chain_skips_missing_credentials() {
        std::env::remove_var("PIXSEED_OPENAI_API_KEY");
        let config = PixseedConfig::default();
        let names = vec![
            "openai".to_string(),
            "picsum".to_string(),
            "local".to_string(),
        ];

        let (chain, skipped) = build_chain(&names, &config);

        let chain_names: Vec<&str> = chain.iter().map(|p| p.name()).collect();
        assert_eq!(chain_names, vec!["picsum", "local"]);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0, "openai");
    }

    #[test]
    fn test_build_chain_skips_disabled() {
        let mut config = PixseedConfig::default();
        config.providers.insert(
            "picsum".to_string(),
            crate::config::ProviderSettings {
                api_key: None,
                api_url: None,
                enabled: Some(false),
            },
        );
        let names = vec!["picsum".to_string(), "local".to_string()];

        let (chain, skipped) = build_chain(&names, &config);
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].name(), "local");
        assert_eq!(skipped[0].1, "disabled in config");
    }
}
