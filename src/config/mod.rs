//! Configuration sources.
//!
//! This module is split into logical submodules:
//! - [`source`]: The [`ConfigSource`] trait every backend implements
//! - [`file`]: TOML and JSON document sources
//! - [`process`]: Prefixed process-environment source
//! - [`error`]: Errors shared by all sources

mod error;
mod file;
mod process;
mod source;

pub use error::ConfigError;
pub use file::{JsonSource, TomlSource};
pub use process::{DEFAULT_PREFIX, ProcessEnvSource};
pub use source::ConfigSource;
