//! Configuration resolution for the CLI.
//!
//! Order: `--config <path>`, then `~/.firewatch/config.toml` if it exists,
//! then built-in defaults. Command-line overrides are applied last and the
//! result is validated again.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use firewatch_monitor::{ConfigError, MonitorConfig};
use std::path::{Path, PathBuf};

/// Default configuration file path (`~/.firewatch/config.toml`).
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".firewatch").join("config.toml"))
}

/// Load the configuration for this invocation.
pub fn load(cli: &Cli) -> Result<MonitorConfig> {
    let config = resolve(cli.config.as_deref(), default_path().as_deref())?;
    apply_overrides(config, &Overrides::from(cli))
}

/// Read the explicit file, else the default file if present, else defaults.
pub fn resolve(explicit: Option<&Path>, fallback: Option<&Path>) -> Result<MonitorConfig> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "Loading configuration");
        return Ok(MonitorConfig::from_file(path)?);
    }

    match fallback {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading configuration");
            Ok(MonitorConfig::from_file(path)?)
        }
        _ => Ok(MonitorConfig::default()),
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Backend base URL
    pub api: Option<String>,
    /// Alert radius in kilometres
    pub radius_km: Option<f64>,
    /// Poll interval in seconds
    pub interval_secs: Option<u64>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            api: cli.api.clone(),
            radius_km: cli.radius,
            interval_secs: cli.interval,
        }
    }
}

/// Apply overrides and validate the result.
pub fn apply_overrides(mut config: MonitorConfig, overrides: &Overrides) -> Result<MonitorConfig> {
    if let Some(api) = &overrides.api {
        config.api_base_url = api.clone();
    }
    if let Some(radius) = overrides.radius_km {
        config.default_radius_km = radius;
    }
    if let Some(interval) = overrides.interval_secs {
        config.poll_interval_secs = interval;
    }

    config.validate().map_err(|e| match e {
        ConfigError::Invalid(msg) => CliError::InvalidInput(msg),
        other => CliError::Config(other),
    })?;
    Ok(config)
}
