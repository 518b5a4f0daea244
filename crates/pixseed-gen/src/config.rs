//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `PIXSEED_{PROVIDER}_API_KEY`,
//!    `PIXSEED_{PROVIDER}_API_URL`
//! 2. Project-local: `.pixseed/config.toml`
//! 3. Global: `~/.pixseed/config.toml`
//!
//! Configuration is resolved once at startup and read-only afterwards.

use pixseed_core::{PixseedError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Provider-specific settings.
///
/// `enabled` is tri-state: a layer that does not mention it leaves the
/// lower layer's setting in place, so a project-local table that only
/// overrides `api_url` cannot silently re-enable a globally disabled
/// provider. Absent everywhere means enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Acquisition workflow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionSettings {
    /// Directory assets are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Provider fallback order, tried first to last per asset
    #[serde(default = "default_fallback_order")]
    pub providers: Vec<String>,
    /// Poll attempt bound for asynchronous providers
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
    /// Fixed delay between poll attempts, in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            providers: default_fallback_order(),
            poll_max_attempts: default_poll_max_attempts(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_output_dir() -> String {
    "public/images".to_string()
}

fn default_fallback_order() -> Vec<String> {
    // Free stock services first, local synthesis as the guaranteed last
    // resort. AI providers are opt-in since they cost money.
    vec![
        "picsum".to_string(),
        "placeholder".to_string(),
        "local".to_string(),
    ]
}

fn default_poll_max_attempts() -> u32 {
    60
}

fn default_poll_interval_secs() -> u64 {
    2
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PixseedConfigFile {
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,
    #[serde(default)]
    pub acquisition: AcquisitionSettings,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone)]
pub struct PixseedConfig {
    pub providers: HashMap<String, ProviderSettings>,
    pub acquisition: AcquisitionSettings,
}

impl Default for PixseedConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            acquisition: AcquisitionSettings::default(),
        }
    }
}

impl PixseedConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = PixseedConfigFile::default();

        // Layer 1: Global config (~/.pixseed/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        // Layer 2: Project-local config (.pixseed/config.toml)
        let local_path = PathBuf::from(".pixseed/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        // Layer 3: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(PixseedConfig {
            providers: config.providers,
            acquisition: config.acquisition,
        })
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(PixseedConfig {
            providers: config.providers,
            acquisition: config.acquisition,
        })
    }

    /// Get API key for a provider
    pub fn api_key(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_key.as_deref())
    }

    /// Get API URL override for a provider
    pub fn api_url(&self, provider_name: &str) -> Option<&str> {
        self.providers
            .get(provider_name)
            .and_then(|p| p.api_url.as_deref())
    }

    /// Check if a provider is enabled
    pub fn is_enabled(&self, provider_name: &str) -> bool {
        self.providers
            .get(provider_name)
            .and_then(|p| p.enabled)
            .unwrap_or(true)
    }

    /// Provider fallback order for this run
    pub fn fallback_order(&self) -> &[String] {
        &self.acquisition.providers
    }

    /// Output directory for acquired assets
    pub fn output_dir(&self) -> &str {
        &self.acquisition.output_dir
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".pixseed").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<PixseedConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: PixseedConfigFile = toml::from_str(&content).map_err(|e| {
            PixseedError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut PixseedConfigFile, overlay: PixseedConfigFile) {
        for (name, provider) in overlay.providers {
            let entry = base.providers.entry(name).or_default();
            if provider.api_key.is_some() {
                entry.api_key = provider.api_key;
            }
            if provider.api_url.is_some() {
                entry.api_url = provider.api_url;
            }
            if provider.enabled.is_some() {
                entry.enabled = provider.enabled;
            }
        }

        if overlay.acquisition.output_dir != default_output_dir() {
            base.acquisition.output_dir = overlay.acquisition.output_dir;
        }
        if overlay.acquisition.providers != default_fallback_order() {
            base.acquisition.providers = overlay.acquisition.providers;
        }
        if overlay.acquisition.poll_max_attempts != default_poll_max_attempts() {
            base.acquisition.poll_max_attempts = overlay.acquisition.poll_max_attempts;
        }
        if overlay.acquisition.poll_interval_secs != default_poll_interval_secs() {
            base.acquisition.poll_interval_secs = overlay.acquisition.poll_interval_secs;
        }
    }

    fn apply_env_overrides(config: &mut PixseedConfigFile) {
        // Only the keyed providers have env overrides
        let provider_names = ["openai", "lovart"];
        for name in &provider_names {
            let key_var = format!("PIXSEED_{}_API_KEY", name.to_uppercase());
            if let Ok(key) = std::env::var(&key_var) {
                let entry = config.providers.entry(name.to_string()).or_default();
                entry.api_key = Some(key);
            }

            let url_var = format!("PIXSEED_{}_API_URL", name.to_uppercase());
            if let Ok(url) = std::env::var(&url_var) {
                let entry = config.providers.entry(name.to_string()).or_default();
                entry.api_url = Some(url);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("pixseed_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        std::env::remove_var("PIXSEED_OPENAI_API_KEY");

        let config_str = r#"
[providers.openai]
api_key = "test-key-123"
enabled = true

[providers.lovart]
api_key = "lv_test"
api_url = "https://lovart.example.com/v1"
enabled = false

[acquisition]
output_dir = "assets/images"
providers = ["openai", "picsum", "local"]
"#;
        let path = temp_config(config_str);
        let config = PixseedConfig::load_from_file(&path).unwrap();

        assert!(config.is_enabled("openai"));
        assert!(!config.is_enabled("lovart"));
        assert_eq!(config.output_dir(), "assets/images");
        let order: Vec<&str> = config.fallback_order().iter().map(|s| s.as_str()).collect();
        assert_eq!(order, vec!["openai", "picsum", "local"]);
        assert_eq!(
            config.api_url("lovart"),
            Some("https://lovart.example.com/v1")
        );

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_env_var_override() {
        let config_str = r#"
[providers.lovart]
api_key = "file-key"
"#;
        let path = temp_config(config_str);

        std::env::set_var("PIXSEED_LOVART_API_KEY", "env-key-override");

        let config = PixseedConfig::load_from_file(&path).unwrap();
        assert_eq!(config.api_key("lovart"), Some("env-key-override"));

        std::env::remove_var("PIXSEED_LOVART_API_KEY");
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_overlay_without_enabled_keeps_lower_layer_disable() {
        let mut base: PixseedConfigFile = toml::from_str(
            r#"
[providers.lovart]
api_key = "global-key"
enabled = false
"#,
        )
        .unwrap();
        // Project layer only changes the endpoint
        let overlay: PixseedConfigFile = toml::from_str(
            r#"
[providers.lovart]
api_url = "http://localhost:9999/v1"
"#,
        )
        .unwrap();

        PixseedConfig::merge_into(&mut base, overlay);
        let config = PixseedConfig {
            providers: base.providers,
            acquisition: base.acquisition,
        };

        assert!(!config.is_enabled("lovart"));
        assert_eq!(config.api_url("lovart"), Some("http://localhost:9999/v1"));
        assert_eq!(config.api_key("lovart"), Some("global-key"));
    }

    #[test]
    fn test_defaults() {
        let config = PixseedConfig::default();
        assert_eq!(config.output_dir(), "public/images");
        let order: Vec<&str> = config.fallback_order().iter().map(|s| s.as_str()).collect();
        assert_eq!(order, vec!["picsum", "placeholder", "local"]);
        assert_eq!(config.acquisition.poll_max_attempts, 60);
        assert_eq!(config.acquisition.poll_interval_secs, 2);
    }

    #[test]
    fn test_missing_provider_returns_none() {
        let config = PixseedConfig::default();
        assert_eq!(config.api_key("nonexistent"), None);
        assert!(config.is_enabled("nonexistent")); // defaults to true
    }
}
