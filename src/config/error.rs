//! Configuration errors.

use thiserror::Error;

/// Errors raised while reading or unmarshalling a configuration source.
///
/// Every variant wraps the underlying mechanism's error unchanged.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse toml config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse json config: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Toml(_) => "toml",
            Self::Json(_) => "json",
        }
    }
}
