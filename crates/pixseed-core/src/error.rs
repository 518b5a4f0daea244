//! Error types for pixseed

use thiserror::Error;

/// The main error type for pixseed operations
#[derive(Debug, Error)]
pub enum PixseedError {
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Duplicate asset id: {0}")]
    DuplicateAssetId(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Acquisition error: {0}")]
    AcquisitionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for pixseed operations
pub type Result<T> = std::result::Result<T, PixseedError>;

impl From<toml::de::Error> for PixseedError {
    fn from(err: toml::de::Error) -> Self {
        PixseedError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PixseedError {
    fn from(err: toml::ser::Error) -> Self {
        PixseedError::TomlSerError(err.to_string())
    }
}
