//! rr-env - print the environment a worker would be started with.

use rr_env::config::DEFAULT_PREFIX;
use rr_env::{ConfigSource, EnvConfig, EnvService, ProcessEnvSource, Setter};
use std::collections::HashMap;
use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the environment.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rr.toml".to_string());

    let config = EnvConfig::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, code = e.error_code(), "Failed to load config");
        e
    })?;

    let mut service = EnvService::new(None);
    service.init(&config);

    let overrides = ProcessEnvSource::capture(DEFAULT_PREFIX);
    let mut extra = HashMap::new();
    overrides.populate(&mut extra)?;
    for (key, value) in &extra {
        service.set_env(key, value);
    }

    info!(
        path = %config_path,
        configured = config.values().len(),
        overrides = extra.len(),
        "Worker environment resolved"
    );

    let pairs = service.pairs().map_err(|e| {
        error!(path = %config_path, error = %e, "Refusing to print worker environment");
        e
    })?;

    let mut stdout = std::io::stdout().lock();
    for pair in pairs {
        writeln!(stdout, "{pair}")?;
    }
    Ok(())
}
