//! rr-env - worker environment configuration.
//!
//! Builds the set of environment variables handed to pool workers: a seed
//! marker (`RR=YES`) merged with values from a configuration source.

pub mod config;
pub mod env;

pub use config::{ConfigError, ConfigSource, JsonSource, ProcessEnvSource, TomlSource};
pub use env::{EnvConfig, EnvError, EnvService, Environment, Setter};
