//! Untyped configuration object as handed over by a file loader.
//!
//! All dynamism lives here; `resolve` converts it into typed `Settings`
//! in a single validation step.

use serde_json::{Map, Value};

/// Freeform key-value configuration object.
#[derive(Debug, Clone, PartialEq)]
pub struct RawConfig(Value);

impl RawConfig {
    /// An empty configuration object (everything defaulted).
    pub fn empty() -> Self {
        RawConfig(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        RawConfig(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(RawConfig)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Value>(text).map(RawConfig)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(RawConfig::empty());
        }
        // A document holding only `~` parses as null; treat it like an empty object.
        let value: Value = serde_yaml::from_str(text)?;
        Ok(match value {
            Value::Null => RawConfig::empty(),
            other => RawConfig(other),
        })
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        RawConfig::empty()
    }
}

impl From<Value> for RawConfig {
    fn from(value: Value) -> Self {
        RawConfig(value)
    }
}
