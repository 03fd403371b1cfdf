//! Resolved, typed settings handed to the scanner and token generator.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::content::ContentMatcher;
use crate::theme::Theme;

/// Compilation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Generate every utility up front, then purge unused ones.
    #[default]
    Aot,
    /// Generate utilities on demand as the scanner finds them.
    Jit,
}

impl Mode {
    pub const ALL: &'static [Mode] = &[Mode::Aot, Mode::Jit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Aot => "aot",
            Mode::Jit => "jit",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown mode: {}", s))
    }
}

/// How `dark:` variants are activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum DarkModeStrategy {
    /// `.dark` class on an ancestor element.
    #[serde(rename = "class")]
    ClassBased,
    /// `prefers-color-scheme: dark` media query.
    #[default]
    #[serde(rename = "media")]
    MediaQueryBased,
}

impl DarkModeStrategy {
    pub const ALL: &'static [DarkModeStrategy] = &[
        DarkModeStrategy::ClassBased,
        DarkModeStrategy::MediaQueryBased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DarkModeStrategy::ClassBased => "class",
            DarkModeStrategy::MediaQueryBased => "media",
        }
    }
}

impl fmt::Display for DarkModeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DarkModeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DarkModeStrategy::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown dark mode strategy: {}", s))
    }
}

/// A plugin reference: bare identifier or identifier with options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl PluginRef {
    pub fn named(name: impl Into<String>) -> Self {
        PluginRef {
            name: name.into(),
            options: None,
        }
    }
}

/// Utility name to enabled variant names, `extend` already folded in.
pub type Variants = BTreeMap<String, Vec<String>>;

/// Fully resolved configuration.
///
/// Serializes back to the raw configuration shape, so a serialized
/// `Settings` resolves to an equal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub mode: Mode,
    #[serde(rename = "content")]
    pub content_globs: Vec<String>,
    #[serde(rename = "darkMode")]
    pub dark_mode_strategy: DarkModeStrategy,
    pub theme: Theme,
    pub variants: Variants,
    pub plugins: Vec<PluginRef>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: Mode::default(),
            content_globs: Vec::new(),
            dark_mode_strategy: DarkModeStrategy::default(),
            theme: Theme::defaults(),
            variants: Variants::new(),
            plugins: Vec::new(),
        }
    }
}

impl Settings {
    /// Compile `content_globs` for the file scanner.
    pub fn content_matcher(&self) -> Result<ContentMatcher, globset::Error> {
        ContentMatcher::new(&self.content_globs)
    }

    /// Serialize to the raw configuration shape.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_strings() {
        assert_eq!("jit".parse::<Mode>().unwrap(), Mode::Jit);
        assert_eq!("aot".parse::<Mode>().unwrap(), Mode::Aot);
        assert!("JIT".parse::<Mode>().is_err());
        assert_eq!(
            "class".parse::<DarkModeStrategy>().unwrap(),
            DarkModeStrategy::ClassBased
        );
        assert_eq!(DarkModeStrategy::MediaQueryBased.to_string(), "media");
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mode, Mode::Aot);
        assert_eq!(settings.dark_mode_strategy, DarkModeStrategy::MediaQueryBased);
        assert!(settings.content_globs.is_empty());
        assert!(settings.plugins.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut settings = Settings::default();
        settings.mode = Mode::Jit;
        settings.dark_mode_strategy = DarkModeStrategy::ClassBased;
        settings.content_globs = vec!["src/**/*.rs".into()];
        settings.plugins = vec![PluginRef::named("forms")];

        let value = settings.to_value().unwrap();
        assert_eq!(value["mode"], json!("jit"));
        assert_eq!(value["darkMode"], json!("class"));
        assert_eq!(value["content"], json!(["src/**/*.rs"]));
        assert_eq!(value["plugins"], json!([{"name": "forms"}]));
        assert_eq!(value["theme"]["screens"]["sm"], json!("640px"));
        assert!(value.get("contentGlobs").is_none());
    }

    #[test]
    fn test_content_matcher_from_settings() {
        let mut settings = Settings::default();
        settings.content_globs = vec!["**/*.scss".into()];
        let matcher = settings.content_matcher().unwrap();
        assert!(matcher.is_match("styles/main.scss"));
        assert!(!matcher.is_match("styles/main.css"));
    }
}
