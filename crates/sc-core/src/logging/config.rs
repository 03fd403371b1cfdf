//! Log settings gathered from the environment and the command line.
//!
//! Precedence, lowest first: built-in defaults, `RUST_LOG` (level only),
//! `STYLECFG_LOG*` variables, CLI flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ENV_LOG_LEVEL: &str = "STYLECFG_LOG";
pub const ENV_LOG_FORMAT: &str = "STYLECFG_LOG_FORMAT";
/// `0`/`false`/`off` drops timestamps from human output.
pub const ENV_LOG_TIMESTAMPS: &str = "STYLECFG_LOG_TIMESTAMPS";

/// How log events are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line, for build tooling.
    Jsonl,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            other => Err(format!("unknown log format '{}' (expected human or jsonl)", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum level passed to the subscriber filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub const ALL: &'static [LogLevel] = &[
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ];

    /// Directive spelling understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    /// Most verbose level mentioned anywhere in a `RUST_LOG` directive list.
    fn most_verbose_in(directives: &str) -> Option<LogLevel> {
        let lower = directives.to_ascii_lowercase();
        LogLevel::ALL
            .iter()
            .copied()
            .filter(|level| *level != LogLevel::Off)
            .find(|level| lower.contains(level.as_str()))
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let alias = match lower.as_str() {
            "warning" => "warn",
            "none" | "quiet" => "off",
            other => other,
        };
        LogLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == alias)
            .ok_or_else(|| format!("unknown log level '{}'", s))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values given on the command line; `None` defers to the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOverrides {
    pub level: Option<LogLevel>,
    pub format: Option<LogFormat>,
    pub timestamps: Option<bool>,
}

/// Effective logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Prefix human output with a timestamp. JSONL always carries one.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Info,
            timestamps: true,
        }
    }
}

impl LogConfig {
    pub fn from_env(overrides: LogOverrides) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// `from_env` with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>, overrides: LogOverrides) -> Self {
        let mut config = LogConfig::default();

        match lookup(ENV_LOG_LEVEL) {
            Some(value) => match value.parse() {
                Ok(level) => config.level = level,
                Err(err) => eprintln!("warning: ignoring {}: {}", ENV_LOG_LEVEL, err),
            },
            None => {
                if let Some(level) = lookup("RUST_LOG").as_deref().and_then(LogLevel::most_verbose_in) {
                    config.level = level;
                }
            }
        }

        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            match value.parse() {
                Ok(format) => config.format = format,
                Err(err) => eprintln!("warning: ignoring {}: {}", ENV_LOG_FORMAT, err),
            }
        }

        if let Some(value) = lookup(ENV_LOG_TIMESTAMPS) {
            config.timestamps = !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            );
        }

        config.level = overrides.level.unwrap_or(config.level);
        config.format = overrides.format.unwrap_or(config.format);
        config.timestamps = overrides.timestamps.unwrap_or(config.timestamps);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Human);
        assert!("xml".parse::<LogFormat>().is_err());

        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("quiet".parse::<LogLevel>().unwrap(), LogLevel::Off);
        assert_eq!("Trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_defaults_without_env() {
        let config = LogConfig::from_lookup(env(&[]), LogOverrides::default());
        assert_eq!(config, LogConfig::default());
        assert!(config.timestamps);
    }

    #[test]
    fn test_stylecfg_log_beats_rust_log() {
        let config = LogConfig::from_lookup(
            env(&[(ENV_LOG_LEVEL, "error"), ("RUST_LOG", "debug")]),
            LogOverrides::default(),
        );
        assert_eq!(config.level, LogLevel::Error);
    }

    #[test]
    fn test_rust_log_picks_most_verbose() {
        let config = LogConfig::from_lookup(
            env(&[("RUST_LOG", "warn,sc_config=debug")]),
            LogOverrides::default(),
        );
        assert_eq!(config.level, LogLevel::Debug);
    }

    #[test]
    fn test_timestamps_env_toggle() {
        for off in ["0", "false", "OFF", "no"] {
            let config = LogConfig::from_lookup(env(&[(ENV_LOG_TIMESTAMPS, off)]), LogOverrides::default());
            assert!(!config.timestamps, "{off} should disable timestamps");
        }
        let config = LogConfig::from_lookup(env(&[(ENV_LOG_TIMESTAMPS, "1")]), LogOverrides::default());
        assert!(config.timestamps);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = LogConfig::from_lookup(
            env(&[
                (ENV_LOG_LEVEL, "error"),
                (ENV_LOG_FORMAT, "jsonl"),
                (ENV_LOG_TIMESTAMPS, "1"),
            ]),
            LogOverrides {
                level: Some(LogLevel::Trace),
                format: Some(LogFormat::Human),
                timestamps: Some(false),
            },
        );
        assert_eq!(
            config,
            LogConfig {
                format: LogFormat::Human,
                level: LogLevel::Trace,
                timestamps: false,
            }
        );
    }
}
