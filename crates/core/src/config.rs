//! Configuration loading utilities
//!
//! Supports loading configuration from multiple sources in priority order:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Config file (searched in standard locations)
//! 4. Built-in defaults (lowest priority)

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// `--config` flag or env var
    Explicit(PathBuf),
    CurrentDir(PathBuf),
    XdgConfig(PathBuf),
    System(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in standard locations
///
/// Search order:
/// 1. Environment variable (e.g., CLIMATE_API_CONFIG)
/// 2. Current directory (e.g., climate-api.toml)
/// 3. XDG config home ($XDG_CONFIG_HOME/climate-api/ or ~/.config/climate-api/)
/// 4. System config (/etc/climate-api/)
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    if let Ok(path) = env::var(env_var) {
        let p = PathBuf::from(&path);
        if p.exists() {
            return ConfigSource::Explicit(p);
        }
    }

    let local = PathBuf::from(filename);
    if local.exists() {
        return ConfigSource::CurrentDir(local);
    }

    let xdg_path = get_xdg_config_path(filename);
    if xdg_path.exists() {
        return ConfigSource::XdgConfig(xdg_path);
    }

    let system = PathBuf::from(format!("/etc/{}/{}", APP_NAME, filename));
    if system.exists() {
        return ConfigSource::System(system);
    }

    ConfigSource::Defaults
}

fn get_xdg_config_path(filename: &str) -> PathBuf {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join(APP_NAME).join(filename)
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home)
            .join(".config")
            .join(APP_NAME)
            .join(filename)
    } else {
        PathBuf::from(format!(".config/{}/{}", APP_NAME, filename))
    }
}

/// Get the XDG data directory for the application
pub fn get_xdg_data_dir() -> PathBuf {
    if let Ok(xdg_data) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join(APP_NAME)
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".local/share").join(APP_NAME)
    } else {
        PathBuf::from(format!(".local/share/{}", APP_NAME))
    }
}

/// Parse the TOML file behind `source`, or `T::default()` when none was found
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    match source.path() {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config: T = toml::from_str(&content)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            Ok(config)
        }
        None => Ok(T::default()),
    }
}
