//! File-backed configuration sources (TOML and JSON).

use serde::de::DeserializeOwned;
use std::path::Path;
use std::str::FromStr;

use super::{ConfigError, ConfigSource};

/// A configuration source backed by a TOML document.
#[derive(Debug, Clone, PartialEq)]
pub struct TomlSource {
    value: toml::Value,
}

impl TomlSource {
    /// Load a TOML source from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// An empty document (contributes no entries).
    pub fn empty() -> Self {
        Self {
            value: toml::Value::Table(toml::Table::new()),
        }
    }
}

impl FromStr for TomlSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let table: toml::Table = toml::from_str(s)?;
        Ok(Self {
            value: toml::Value::Table(table),
        })
    }
}

impl ConfigSource for TomlSource {
    fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        self.value.clone().try_into::<T>().map_err(ConfigError::from)
    }

    fn section(&self, name: &str) -> Option<Self> {
        self.value.get(name).map(|value| Self {
            value: value.clone(),
        })
    }
}

/// A configuration source backed by a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonSource {
    value: serde_json::Value,
}

impl JsonSource {
    /// Load a JSON source from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }
}

impl From<serde_json::Value> for JsonSource {
    fn from(value: serde_json::Value) -> Self {
        Self { value }
    }
}

impl FromStr for JsonSource {
    type Err = ConfigError;

    /// Blank input is read as `null`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self {
                value: serde_json::Value::Null,
            });
        }
        Ok(Self {
            value: serde_json::from_str(s)?,
        })
    }
}

impl ConfigSource for JsonSource {
    fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(self.value.clone()).map_err(ConfigError::from)
    }

    fn section(&self, name: &str) -> Option<Self> {
        self.value
            .as_object()
            .and_then(|object| object.get(name))
            .map(|value| Self {
                value: value.clone(),
            })
    }
}
