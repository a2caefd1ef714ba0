//! Process-environment configuration source.

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use super::{ConfigError, ConfigSource};

/// Default prefix for variables forwarded to workers.
pub const DEFAULT_PREFIX: &str = "RR_ENV_";

/// A flat configuration source built from prefixed environment variables.
///
/// `RR_ENV_DB_HOST=db` is exposed as the entry `DB_HOST = "db"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessEnvSource {
    vars: BTreeMap<String, String>,
}

impl ProcessEnvSource {
    /// Snapshot the current process environment.
    ///
    /// Variables that are not valid unicode are skipped.
    pub fn capture(prefix: &str) -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_vars(prefix, vars)
    }

    /// Build a source from explicit `(name, value)` pairs.
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let name = key.as_ref().strip_prefix(prefix)?;
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.into()))
            })
            .collect();
        Self { vars }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl ConfigSource for ProcessEnvSource {
    fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(object)).map_err(ConfigError::from)
    }

    /// The environment is flat.
    fn section(&self, _name: &str) -> Option<Self> {
        None
    }
}
