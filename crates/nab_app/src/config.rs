//! App configuration file handling (netsbirds.toml)

use crate::error::{AppError, Result};
use nab_splash::SplashConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "netsbirds.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub splash: SplashConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(input)?;
        config.splash.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AppError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Where the app runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Web,
    Ios,
    Android,
}

/// A device the web build can imitate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Ios,
    Android,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Ios => f.write_str("ios"),
            DeviceKind::Android => f.write_str("android"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device '{0}'")]
pub struct UnknownDevice(pub String);

impl FromStr for DeviceKind {
    type Err = UnknownDevice;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ios" => Ok(DeviceKind::Ios),
            "android" => Ok(DeviceKind::Android),
            other => Err(UnknownDevice(other.to_string())),
        }
    }
}

/// Platform settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub target: Platform,
    /// Device to emulate on the web, as the `emulate` query parameter would
    #[serde(default)]
    pub emulate: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}
