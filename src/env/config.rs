//! Worker environment configuration.

use std::collections::HashMap;
use std::path::Path;

use super::EnvService;
use crate::config::{ConfigError, ConfigSource, JsonSource, TomlSource};

/// Marker variable set on every configured worker.
pub const SEED_KEY: &str = "RR";
/// Value of [`SEED_KEY`] unless the source overrides it.
pub const SEED_VALUE: &str = "YES";

/// Set of environment values for workers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Values to set as the worker environment.
    values: HashMap<String, String>,
}

impl EnvConfig {
    /// The defaults every hydrated config starts from.
    pub fn seed() -> HashMap<String, String> {
        HashMap::from([(SEED_KEY.to_string(), SEED_VALUE.to_string())])
    }

    /// Populate values from the given source.
    ///
    /// Values are reset to [`EnvConfig::seed`] and the source's entries are
    /// merged on top, the source winning on collisions. On error the seed is
    /// left in place and the source's error is returned as is.
    pub fn hydrate<S: ConfigSource>(&mut self, source: &S) -> Result<(), ConfigError> {
        self.values = Self::seed();
        source.populate(&mut self.values)
    }

    /// Load the `env` section of a config file.
    ///
    /// Files ending in `.json` (any case) are read as JSON, anything else as
    /// TOML.
    /// A file without an `env` section yields just the seed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut cfg = Self::default();
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
            let source = JsonSource::load(path)?;
            let section = source
                .section(EnvService::ID)
                .unwrap_or_else(|| JsonSource::from(serde_json::Value::Null));
            cfg.hydrate(&section)?;
        } else {
            let source = TomlSource::load(path)?;
            let section = source
                .section(EnvService::ID)
                .unwrap_or_else(TomlSource::empty);
            cfg.hydrate(&section)?;
        }
        Ok(cfg)
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn into_values(self) -> HashMap<String, String> {
        self.values
    }
}
