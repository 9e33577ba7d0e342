//! Configuration loader
//!
//! Loads monitor configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Start from the built-in defaults
//! 2. If a config file is found, its values replace the defaults
//! 3. Environment variables override both
//!
//! Every field is optional at every layer; the engine always ends up with a
//! complete `MonitorConfig`.
//!
//! ## Environment Variables
//! - `WAYHOME_GRACE_PERIOD_MINUTES`: grace before the overdue check
//! - `WAYHOME_RESPONSE_TIME_MINUTES`: check-in window before guardian notify
//! - `WAYHOME_ARRIVAL_RADIUS_KM`: arrival proximity threshold
//! - `WAYHOME_POLL_INTERVAL_SECS`: arrival poll cadence
//! - `WAYHOME_WALKING_SPEED_KMH`: speed assumed by the ETA estimator
//! - `WAYHOME_TICK_INTERVAL_SECS`: telemetry tick cadence
//! - `WAYHOME_LOCATION_TIMEOUT_SECS`: position request bound
//! - `WAYHOME_ARRIVED_DISPLAY_SECS` / `WAYHOME_SOS_DISPLAY_SECS`: display
//!   phase auto-revert delays
//!
//! ## File Locations
//! The loader probes (in order): `./config.{json,toml}`,
//! `./wayhome.{json,toml}`, the same names up to two parent directories, and
//! relative to the executable location.

use std::path::{Path, PathBuf};

use wayhome_domain::{MonitorConfig, Result, WayhomeError};

/// Load configuration with the layered fallback strategy.
///
/// # Errors
/// Returns `WayhomeError::Config` if a discovered file fails to parse or an
/// environment variable holds an unparsable value. A missing file is not an
/// error; the defaults carry.
pub fn load() -> Result<MonitorConfig> {
    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found; using defaults");
            MonitorConfig::default()
        }
    };
    apply_env_overrides(base)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. Supports JSON and
/// TOML, detected by extension.
///
/// # Errors
/// Returns `WayhomeError::Config` if the file is missing (when a path was
/// given), no file is found (when probing), or the contents fail to parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<MonitorConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WayhomeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WayhomeError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WayhomeError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format detected by extension.
fn parse_config(contents: &str, path: &Path) -> Result<MonitorConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WayhomeError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WayhomeError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(WayhomeError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Apply `WAYHOME_*` environment overrides on top of `base`.
///
/// # Errors
/// Returns `WayhomeError::Config` when a set variable fails to parse.
pub fn apply_env_overrides(mut base: MonitorConfig) -> Result<MonitorConfig> {
    if let Some(value) = env_f64("WAYHOME_GRACE_PERIOD_MINUTES")? {
        base.grace_period_minutes = value;
    }
    if let Some(value) = env_f64("WAYHOME_RESPONSE_TIME_MINUTES")? {
        base.response_time_minutes = value;
    }
    if let Some(value) = env_f64("WAYHOME_ARRIVAL_RADIUS_KM")? {
        base.arrival_radius_km = value;
    }
    if let Some(value) = env_u64("WAYHOME_POLL_INTERVAL_SECS")? {
        base.poll_interval_secs = value;
    }
    if let Some(value) = env_f64("WAYHOME_WALKING_SPEED_KMH")? {
        base.walking_speed_kmh = value;
    }
    if let Some(value) = env_u64("WAYHOME_TICK_INTERVAL_SECS")? {
        base.tick_interval_secs = value;
    }
    if let Some(value) = env_u64("WAYHOME_LOCATION_TIMEOUT_SECS")? {
        base.location_timeout_secs = value;
    }
    if let Some(value) = env_u64("WAYHOME_ARRIVED_DISPLAY_SECS")? {
        base.arrived_display_secs = value;
    }
    if let Some(value) = env_u64("WAYHOME_SOS_DISPLAY_SECS")? {
        base.sos_display_secs = value;
    }
    Ok(base)
}

/// Probe multiple paths for configuration files.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for name in ["config.json", "config.toml", "wayhome.json", "wayhome.toml"] {
            candidates.push(cwd.join(name));
        }
        for name in ["config.json", "config.toml"] {
            candidates.push(cwd.join("..").join(name));
            candidates.push(cwd.join("../..").join(name));
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            for name in ["config.json", "config.toml", "wayhome.json", "wayhome.toml"] {
                candidates.push(exe_dir.join(name));
            }
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|e| WayhomeError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|e| WayhomeError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}
