//! Output formats and payload rendering.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON (default for machine consumption)
    #[default]
    Json,

    /// YAML, matching the accepted config file syntax
    Yaml,

    /// One-line-per-fact human summary
    Summary,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Render a structured payload.
///
/// `Summary` has no generic rendering; callers print their own summary
/// lines and only fall back to JSON here.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Json | OutputFormat::Summary => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_json_and_yaml() {
        let value = json!({"mode": "jit"});
        assert_eq!(
            render(&value, OutputFormat::Json).unwrap(),
            "{\n  \"mode\": \"jit\"\n}"
        );
        assert_eq!(render(&value, OutputFormat::Yaml).unwrap(), "mode: jit\n");
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputFormat::Summary.to_string(), "summary");
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
