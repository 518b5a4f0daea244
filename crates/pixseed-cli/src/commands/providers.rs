//! Providers command: show registered providers and their status

use anyhow::Result;
use pixseed_gen::providers::{available_providers, create_provider};
use pixseed_gen::{PixseedConfig, ProviderStatus};

pub fn run() -> Result<()> {
    let config = PixseedConfig::load()?;

    println!("Registered providers:");
    for name in available_providers() {
        match create_provider(name, &config) {
            Ok(provider) => {
                let status = match provider.health_check() {
                    ProviderStatus::Available => "available",
                    ProviderStatus::NoApiKey => "no api key",
                };
                println!(
                    "  {:<12} {:<13} {}",
                    provider.name(),
                    provider.protocol().to_string(),
                    status
                );
            }
            Err(e) => {
                println!("  {:<12} {:<13} not configured ({})", name, "-", e);
            }
        }
    }

    println!(
        "\nConfigured fallback order: {}",
        config.fallback_order().join(", ")
    );
    Ok(())
}
