//! Configuration file discovery.
//!
//! Resolution order: CLI argument → environment variables → project
//! directory (and its ancestors) → XDG config → builtin defaults.

use std::path::{Path, PathBuf};

/// Where the configuration file was found, plus provenance.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredConfig {
    /// Path to the configuration file (None means builtin defaults).
    pub path: Option<PathBuf>,

    /// Source of the configuration (for diagnostics).
    pub source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in the project directory or one of its ancestors.
    ProjectDir,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::ProjectDir => write!(f, "project directory"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "STYLECFG_CONFIG";
pub const ENV_CONFIG_DIR: &str = "STYLECFG_CONFIG_DIR";

/// Standard config file names, in preference order.
pub const CONFIG_FILENAMES: &[&str] = &[
    "style.config.json",
    "style.config.toml",
    "style.config.yaml",
    "style.config.yml",
];

/// Application name for XDG directories.
const APP_NAME: &str = "stylecfg";

/// Discover the configuration file.
///
/// 1. Explicit CLI path (if provided; used even when missing so the loader
///    reports it)
/// 2. `STYLECFG_CONFIG` environment variable
/// 3. `STYLECFG_CONFIG_DIR` environment variable + standard file names
/// 4. `project_root` (or the working directory) and its ancestors
/// 5. XDG config directory (~/.config/stylecfg/)
/// 6. Built-in defaults (None)
pub fn discover_config(cli_path: Option<&Path>, project_root: Option<&Path>) -> DiscoveredConfig {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return found(path.to_path_buf(), ConfigSource::CliArgument);
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.is_file() {
            return found(path, ConfigSource::Environment);
        }
        tracing::warn!(var = ENV_CONFIG_PATH, path = %path.display(), "config path from environment does not exist");
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        if let Some(path) = find_in_dir(Path::new(&config_dir)) {
            return found(path, ConfigSource::Environment);
        }
    }

    // 4. Project directory and ancestors
    let start = project_root
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok());
    if let Some(start) = start {
        for dir in start.ancestors() {
            if let Some(path) = find_in_dir(dir) {
                return found(path, ConfigSource::ProjectDir);
            }
        }
    }

    // 5. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        if let Some(path) = find_in_dir(&dir) {
            return found(path, ConfigSource::XdgConfig);
        }
    }

    // 6. Built-in default (None)
    tracing::debug!("no configuration file found; using builtin defaults");
    DiscoveredConfig::default()
}

fn found(path: PathBuf, source: ConfigSource) -> DiscoveredConfig {
    tracing::debug!(path = %path.display(), source = %source, "configuration file discovered");
    DiscoveredConfig {
        path: Some(path),
        source,
    }
}

/// First standard config file present in `dir`.
pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Get the XDG config directory for stylecfg.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::CliArgument), "CLI argument");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::ProjectDir), "project directory");
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn test_cli_path_wins_even_if_missing() {
        let found = discover_config(Some(Path::new("/nonexistent/style.config.json")), None);
        assert_eq!(found.source, ConfigSource::CliArgument);
        assert_eq!(
            found.path.unwrap(),
            PathBuf::from("/nonexistent/style.config.json")
        );
    }

    #[test]
    fn test_find_in_dir_preference_order() {
        let temp = TempDir::new().unwrap();
        assert!(find_in_dir(temp.path()).is_none());

        fs::write(temp.path().join("style.config.yaml"), "mode: jit\n").unwrap();
        assert_eq!(
            find_in_dir(temp.path()).unwrap(),
            temp.path().join("style.config.yaml")
        );

        fs::write(temp.path().join("style.config.json"), "{}").unwrap();
        assert_eq!(
            find_in_dir(temp.path()).unwrap(),
            temp.path().join("style.config.json")
        );
    }

    #[test]
    fn test_xdg_config_dir() {
        if let Some(path) = xdg_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }
}
