//! Style content and theme configuration.
//!
//! This crate provides:
//! - `RawConfig`, the untyped object handed over by a file loader
//! - `resolve`, validating and normalizing it into typed `Settings`
//! - Built-in default theme tokens and deep merge of `theme.extend`
//! - Content glob matching for the class scanner
//! - Config discovery (CLI → env → project dir → XDG → defaults)
//! - Settings snapshots for build logs

pub mod content;
pub mod discover;
pub mod load;
pub mod raw;
pub mod resolve;
pub mod settings;
pub mod snapshot;
pub mod theme;
pub mod validate;

pub use content::ContentMatcher;
pub use discover::{discover_config, ConfigSource, DiscoveredConfig};
pub use load::{load_discovered, load_settings, LoadError, LoadedConfig};
pub use raw::RawConfig;
pub use resolve::resolve;
pub use settings::{DarkModeStrategy, Mode, PluginRef, Settings};
pub use snapshot::SettingsSnapshot;
pub use theme::Theme;
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration snapshots.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
