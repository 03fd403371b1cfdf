//! Settings snapshots for build logs and reproducibility.
//!
//! A snapshot captures the exact resolved configuration at the start of a
//! build so that watch-mode rebuilds can detect when it changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::discover::ConfigSource;
use crate::load::LoadedConfig;
use crate::settings::Settings;

/// A frozen snapshot of resolved configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Hostname where snapshot was taken.
    #[serde(default)]
    pub hostname: Option<String>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// Path where the configuration was loaded from.
    #[serde(default)]
    pub config_path: Option<String>,

    /// Source of the configuration.
    pub config_source: String,

    /// SHA-256 hash of the configuration file content.
    #[serde(default)]
    pub file_hash: Option<String>,

    /// SHA-256 hash of the canonical resolved settings JSON.
    pub settings_hash: String,

    /// Key configuration values for quick reference.
    pub summary: SettingsSummary,
}

/// Summary of key configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSummary {
    pub mode: String,
    pub dark_mode: String,
    pub content_glob_count: usize,
    pub plugin_count: usize,
    /// Breakpoint names, ascending by width.
    pub screens: Vec<String>,
    pub theme_categories: Vec<String>,
}

impl SettingsSnapshot {
    /// Create a new snapshot from a loaded configuration.
    pub fn new(loaded: &LoadedConfig) -> Result<Self, serde_json::Error> {
        let settings_json = serde_json::to_string(&loaded.settings)?;
        Ok(SettingsSnapshot {
            timestamp: Utc::now(),
            hostname: current_hostname(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            config_path: loaded.path.as_ref().map(|p| p.display().to_string()),
            config_source: loaded.source.to_string(),
            file_hash: loaded.raw_text.as_deref().map(hash_content),
            settings_hash: hash_content(&settings_json),
            summary: SettingsSummary::from_settings(&loaded.settings),
        })
    }

    /// Create a snapshot with only defaults (no config file loaded).
    pub fn defaults_only() -> Result<Self, serde_json::Error> {
        let settings = Settings::default();
        Ok(SettingsSnapshot {
            timestamp: Utc::now(),
            hostname: current_hostname(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            config_path: None,
            config_source: ConfigSource::BuiltinDefault.to_string(),
            file_hash: None,
            settings_hash: hash_content(&serde_json::to_string(&settings)?),
            summary: SettingsSummary::from_settings(&settings),
        })
    }

    /// Serialize snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if this snapshot resolved to the same settings as another.
    pub fn matches(&self, other: &SettingsSnapshot) -> bool {
        self.settings_hash == other.settings_hash
    }

    /// Get a short identifier for this snapshot (first 12 chars of hash).
    pub fn short_id(&self) -> &str {
        &self.settings_hash[..12.min(self.settings_hash.len())]
    }
}

impl SettingsSummary {
    pub fn from_settings(settings: &Settings) -> Self {
        SettingsSummary {
            mode: settings.mode.to_string(),
            dark_mode: settings.dark_mode_strategy.to_string(),
            content_glob_count: settings.content_globs.len(),
            plugin_count: settings.plugins.len(),
            screens: settings.theme.screens().into_iter().map(|b| b.name).collect(),
            theme_categories: settings.theme.categories().map(str::to_string).collect(),
        }
    }
}

fn current_hostname() -> Option<String> {
    hostname::get()
        .ok()
        .map(|h| h.to_string_lossy().to_string())
}

/// Hash content with SHA-256 and return hex string.
fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawConfig;
    use crate::resolve::resolve;
    use serde_json::json;

    fn loaded_from(value: serde_json::Value, text: &str) -> LoadedConfig {
        LoadedConfig {
            settings: resolve(&RawConfig::from_value(value)).unwrap(),
            path: Some("style.config.json".into()),
            source: ConfigSource::ProjectDir,
            raw_text: Some(text.to_string()),
        }
    }

    #[test]
    fn test_defaults_snapshot() {
        let snapshot = SettingsSnapshot::defaults_only().unwrap();
        assert_eq!(snapshot.schema_version, crate::CONFIG_SCHEMA_VERSION);
        assert!(snapshot.file_hash.is_none());
        assert_eq!(snapshot.config_source, "builtin default");
        assert_eq!(snapshot.summary.mode, "aot");
        assert_eq!(snapshot.summary.screens, vec!["sm", "md", "lg", "xl", "2xl"]);
    }

    #[test]
    fn test_snapshot_short_id() {
        let snapshot = SettingsSnapshot::defaults_only().unwrap();
        assert_eq!(snapshot.short_id().len(), 12);
    }

    #[test]
    fn test_equivalent_files_match() {
        // Different text, same resolved settings.
        let a = SettingsSnapshot::new(&loaded_from(json!({}), "{}")).unwrap();
        let b = SettingsSnapshot::new(&loaded_from(json!({"mode": "aot"}), "{\"mode\": \"aot\"}"))
            .unwrap();
        assert!(a.matches(&b));
        assert_ne!(a.file_hash, b.file_hash);
        assert!(a.matches(&SettingsSnapshot::defaults_only().unwrap()));
    }

    #[test]
    fn test_different_settings_do_not_match() {
        let a = SettingsSnapshot::new(&loaded_from(json!({}), "{}")).unwrap();
        let b = SettingsSnapshot::new(&loaded_from(json!({"darkMode": "class"}), "x")).unwrap();
        assert!(!a.matches(&b));
        assert_eq!(b.summary.dark_mode, "class");
        assert_eq!(b.config_path.as_deref(), Some("style.config.json"));
    }

    #[test]
    fn test_hash_content() {
        let hash1 = hash_content("test");
        let hash2 = hash_content("test");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64); // SHA-256 produces 64 hex chars
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let snapshot = SettingsSnapshot::defaults_only().unwrap();
        let json = snapshot.to_json().unwrap();
        let restored = SettingsSnapshot::from_json(&json).unwrap();
        assert!(snapshot.matches(&restored));
        assert_eq!(restored.summary.theme_categories, snapshot.summary.theme_categories);
    }
}
