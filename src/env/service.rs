//! The environment service shared by worker factories.

use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

use super::EnvConfig;

/// Errors returned by an [`Environment`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("environment service is not initialized")]
    Uninitialized,
    #[error("invalid environment key: {0:?}")]
    InvalidKey(String),
    #[error("invalid value for environment key {0}")]
    InvalidValue(String),
}

/// Check that a pair can be rendered as a single `KEY=VALUE` line.
///
/// Keys must be non-empty and free of `=`, newlines and NUL; values must be
/// free of newlines and NUL.
pub fn validate_pair(key: &str, value: &str) -> Result<(), EnvError> {
    if key.is_empty() || key.contains(['=', '\n', '\r', '\0']) {
        return Err(EnvError::InvalidKey(key.to_string()));
    }
    if value.contains(['\n', '\r', '\0']) {
        return Err(EnvError::InvalidValue(key.to_string()));
    }
    Ok(())
}

/// Anything that accepts environment values.
pub trait Setter {
    /// Set or create an environment value.
    fn set_env(&mut self, key: &str, value: &str);
}

impl Setter for HashMap<String, String> {
    fn set_env(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

impl Setter for BTreeMap<String, String> {
    fn set_env(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/// Provides and manages the environment values passed to workers.
pub trait Environment: Setter {
    /// All environment values.
    fn get_env(&self) -> Result<HashMap<String, String>, EnvError>;

    /// Copy all environment values into the given setter.
    fn copy(&self, setter: &mut dyn Setter) -> Result<(), EnvError> {
        for (key, value) in self.get_env()? {
            setter.set_env(&key, &value);
        }
        Ok(())
    }
}

/// Holds the worker environment assembled from defaults and configuration.
#[derive(Debug, Clone, Default)]
pub struct EnvService {
    values: Option<HashMap<String, String>>,
}

impl EnvService {
    /// Name of the configuration section this service reads.
    pub const ID: &'static str = "env";

    /// Create the service with optional predefined values.
    pub fn new(defaults: Option<HashMap<String, String>>) -> Self {
        Self { values: defaults }
    }

    /// Apply the configured values over the current ones.
    ///
    /// Without predefined values the service starts from [`EnvConfig::seed`].
    pub fn init(&mut self, cfg: &EnvConfig) {
        let values = self.values.get_or_insert_with(EnvConfig::seed);
        for (key, value) in cfg.values() {
            values.insert(key.clone(), value.clone());
        }
        debug!(count = values.len(), "Environment service initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.values.is_some()
    }

    /// `KEY=VALUE` strings sorted by key.
    ///
    /// Fails on the first pair that would not fit on one line.
    pub fn pairs(&self) -> Result<Vec<String>, EnvError> {
        let values = self.values.as_ref().ok_or(EnvError::Uninitialized)?;
        let sorted: BTreeMap<&str, &str> = values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        sorted
            .into_iter()
            .map(|(k, v)| {
                validate_pair(k, v)?;
                Ok(format!("{k}={v}"))
            })
            .collect()
    }
}

impl Setter for EnvService {
    fn set_env(&mut self, key: &str, value: &str) {
        self.values
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.to_string());
    }
}

impl Environment for EnvService {
    fn get_env(&self) -> Result<HashMap<String, String>, EnvError> {
        self.values.clone().ok_or(EnvError::Uninitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TomlSource;

    fn hydrated(toml: &str) -> EnvConfig {
        let mut cfg = EnvConfig::default();
        cfg.hydrate(&toml.parse::<TomlSource>().unwrap()).unwrap();
        cfg
    }

    #[test]
    fn test_uninitialized_service() {
        let svc = EnvService::new(None);
        assert!(!svc.is_initialized());
        assert_eq!(svc.get_env(), Err(EnvError::Uninitialized));
        assert_eq!(svc.pairs(), Err(EnvError::Uninitialized));

        let mut sink: HashMap<String, String> = HashMap::new();
        assert_eq!(svc.copy(&mut sink), Err(EnvError::Uninitialized));
    }

    #[test]
    fn test_init_without_defaults_seeds() {
        let mut svc = EnvService::new(None);
        svc.init(&EnvConfig::default());

        let env = svc.get_env().unwrap();
        assert_eq!(env.len(), 1);
        assert_eq!(env["RR"], "YES");
    }

    #[test]
    fn test_init_config_wins_over_defaults() {
        let defaults = HashMap::from([
            ("MODE".to_string(), "dev".to_string()),
            ("KEEP".to_string(), "1".to_string()),
        ]);
        let mut svc = EnvService::new(Some(defaults));

        svc.init(&hydrated(r#"MODE = "prod""#));

        let env = svc.get_env().unwrap();
        assert_eq!(env["MODE"], "prod");
        assert_eq!(env["KEEP"], "1");
        assert_eq!(env["RR"], "YES");
    }

    #[test]
    fn test_set_env_and_pairs_sorted() {
        let mut svc = EnvService::new(None);
        svc.init(&hydrated(r#"B = "2""#));
        svc.set_env("A", "1");

        assert_eq!(svc.pairs().unwrap(), vec!["A=1", "B=2", "RR=YES"]);
    }

    #[test]
    fn test_pairs_rejects_multiline_value() {
        let mut svc = EnvService::new(None);
        svc.init(&hydrated(r#"A = "x\nB=evil""#));

        assert_eq!(svc.pairs(), Err(EnvError::InvalidValue("A".to_string())));
    }

    #[test]
    fn test_pairs_rejects_bad_keys() {
        for key in ["", "A=B", "A\nB", "A\0"] {
            let mut svc = EnvService::new(None);
            svc.set_env(key, "1");
            assert_eq!(svc.pairs(), Err(EnvError::InvalidKey(key.to_string())));
        }
    }

    #[test]
    fn test_validate_pair_allows_equals_in_value() {
        assert_eq!(validate_pair("DSN", "host=db port=5432"), Ok(()));
        assert_eq!(
            validate_pair("A", "x\0y"),
            Err(EnvError::InvalidValue("A".to_string()))
        );
    }

    #[test]
    fn test_copy_into_setter() {
        let mut svc = EnvService::new(None);
        svc.init(&hydrated(r#"HOST = "localhost""#));

        let mut sink: BTreeMap<String, String> = BTreeMap::new();
        sink.set_env("HOST", "stale");
        svc.copy(&mut sink).unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink["HOST"], "localhost");
        assert_eq!(sink["RR"], "YES");
    }
}
