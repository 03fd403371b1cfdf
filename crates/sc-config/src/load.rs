//! Reading configuration files from disk and resolving them.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::discover::{ConfigSource, DiscoveredConfig};
use crate::raw::RawConfig;
use crate::resolve::resolve;
use crate::settings::Settings;
use crate::validate::ValidationError;

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config format for {path} (expected .json, .toml, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid {format} in config file {path}: {message}")]
    ParseError {
        path: PathBuf,
        format: ConfigFormat,
        message: String,
    },

    #[error("Config validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl LoadError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            LoadError::NotFound { .. } => 60,
            LoadError::IoError { .. } => 60,
            LoadError::UnsupportedFormat { .. } => 61,
            LoadError::ParseError { .. } => 61,
            LoadError::ValidationError(inner) => inner.code(),
        }
    }
}

/// On-disk configuration format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<ConfigFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }

    /// Parse text in this format into a raw configuration object.
    pub fn parse(self, text: &str) -> Result<RawConfig, String> {
        match self {
            ConfigFormat::Json => RawConfig::from_json_str(text).map_err(|e| e.to_string()),
            ConfigFormat::Toml => RawConfig::from_toml_str(text).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => RawConfig::from_yaml_str(text).map_err(|e| e.to_string()),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "JSON"),
            ConfigFormat::Toml => write!(f, "TOML"),
            ConfigFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Resolved settings with provenance information.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub settings: Settings,
    /// Path the settings were read from (None when using defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
    /// Exact file content, kept for snapshot hashing.
    pub raw_text: Option<String>,
}

/// Read and parse a configuration file without resolving it.
pub fn read_raw(path: &Path) -> Result<(RawConfig, String), LoadError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let raw = format.parse(&text).map_err(|message| LoadError::ParseError {
        path: path.to_path_buf(),
        format,
        message,
    })?;
    Ok((raw, text))
}

/// Load, validate and resolve a configuration file.
pub fn load_settings(path: &Path) -> Result<Settings, LoadError> {
    let (raw, _) = read_raw(path)?;
    Ok(resolve(&raw)?)
}

/// Load whatever discovery found, falling back to builtin defaults.
pub fn load_discovered(discovered: &DiscoveredConfig) -> Result<LoadedConfig, LoadError> {
    let Some(path) = discovered.path.as_deref() else {
        return Ok(LoadedConfig {
            settings: resolve(&RawConfig::empty())?,
            path: None,
            source: discovered.source.clone(),
            raw_text: None,
        });
    };

    let (raw, text) = read_raw(path)?;
    let settings = resolve(&raw)?;
    tracing::info!(
        path = %path.display(),
        source = %discovered.source,
        mode = %settings.mode,
        "configuration loaded"
    );
    Ok(LoadedConfig {
        settings,
        path: Some(path.to_path_buf()),
        source: discovered.source.clone(),
        raw_text: Some(text),
    })
}
