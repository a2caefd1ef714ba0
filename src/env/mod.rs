//! Worker environment.
//!
//! - [`config`]: [`EnvConfig`], hydrated from a configuration source
//! - [`service`]: [`EnvService`] and the [`Environment`] / [`Setter`] seams

mod config;
mod service;

pub use config::{EnvConfig, SEED_KEY, SEED_VALUE};
pub use service::{EnvError, EnvService, Environment, Setter, validate_pair};
