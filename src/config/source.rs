//! The configuration source abstraction.

use serde::de::DeserializeOwned;
use std::collections::HashMap;

use super::ConfigError;

/// A configuration source that can unmarshal its data into a target type.
///
/// Implementations wrap a parsed document (file, process environment, etc.)
/// and know nothing about the structures being filled.
pub trait ConfigSource {
    /// Deserialize the whole source document into `T`.
    fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, ConfigError>;

    /// Get the named sub-document, if this source has one.
    fn section(&self, name: &str) -> Option<Self>
    where
        Self: Sized;

    /// Merge the source's string entries into `target`.
    ///
    /// Source entries overwrite existing keys. A null or empty document
    /// contributes nothing. `target` is untouched when unmarshalling fails.
    fn populate(&self, target: &mut HashMap<String, String>) -> Result<(), ConfigError> {
        let entries: Option<HashMap<String, String>> = self.unmarshal()?;
        if let Some(entries) = entries {
            target.extend(entries);
        }
        Ok(())
    }
}
