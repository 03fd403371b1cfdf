//! Raw configuration object to typed `Settings`.
//!
//! Pure and one-shot: no filesystem access, no shared state. The first
//! malformed field aborts resolution; no partial settings are returned.

use serde_json::{Map, Value};

use crate::content::resolve_content;
use crate::raw::RawConfig;
use crate::settings::{DarkModeStrategy, Mode, PluginRef, Settings, Variants};
use crate::theme::{resolve_theme, EXTEND_KEY};
use crate::validate::{
    expect_array, expect_object, expect_str, FieldPath, ValidationError, ValidationResult,
};

/// Top-level keys understood by the resolver. Anything else is ignored.
pub const KNOWN_KEYS: &[&str] = &["mode", "content", "darkMode", "theme", "variants", "plugins"];

/// Validate and normalize a raw configuration object.
pub fn resolve(raw: &RawConfig) -> ValidationResult<Settings> {
    let root = FieldPath::root();
    let obj = expect_object(&root, raw.as_value())?;

    for key in obj.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
        tracing::debug!(key = %key, "ignoring unknown configuration key");
    }

    let settings = Settings {
        mode: resolve_mode(&root.key("mode"), top_level(obj, "mode"))?,
        content_globs: resolve_content(&root.key("content"), top_level(obj, "content"))?,
        dark_mode_strategy: resolve_dark_mode(&root.key("darkMode"), top_level(obj, "darkMode"))?,
        theme: resolve_theme(&root.key("theme"), top_level(obj, "theme"))?,
        variants: resolve_variants(&root.key("variants"), top_level(obj, "variants"))?,
        plugins: resolve_plugins(&root.key("plugins"), top_level(obj, "plugins"))?,
    };

    tracing::debug!(
        mode = %settings.mode,
        dark_mode = %settings.dark_mode_strategy,
        content_globs = settings.content_globs.len(),
        plugins = settings.plugins.len(),
        "configuration resolved"
    );
    Ok(settings)
}

/// Top-level field lookup; an explicit `null` (e.g. an empty YAML key)
/// counts as absent.
fn top_level<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

fn one_of(names: impl Iterator<Item = &'static str>) -> String {
    format!("one of: {}", names.collect::<Vec<_>>().join(", "))
}

fn resolve_mode(field: &FieldPath, raw: Option<&Value>) -> ValidationResult<Mode> {
    let Some(raw) = raw else {
        return Ok(Mode::default());
    };
    let text = expect_str(field, raw)?;
    text.parse().map_err(|_| {
        ValidationError::invalid_value(
            field,
            one_of(Mode::ALL.iter().map(Mode::as_str)),
            format!("{:?}", text),
        )
    })
}

fn resolve_dark_mode(field: &FieldPath, raw: Option<&Value>) -> ValidationResult<DarkModeStrategy> {
    let Some(raw) = raw else {
        return Ok(DarkModeStrategy::default());
    };
    let text = expect_str(field, raw)?;
    text.parse().map_err(|_| {
        ValidationError::invalid_value(
            field,
            one_of(DarkModeStrategy::ALL.iter().map(DarkModeStrategy::as_str)),
            format!("{:?}", text),
        )
    })
}

fn string_list(field: &FieldPath, raw: &Value) -> ValidationResult<Vec<String>> {
    expect_array(field, raw)?
        .iter()
        .enumerate()
        .map(|(i, item)| expect_str(&field.index(i), item).map(str::to_string))
        .collect()
}

fn resolve_variants(field: &FieldPath, raw: Option<&Value>) -> ValidationResult<Variants> {
    let Some(raw) = raw else {
        return Ok(Variants::new());
    };
    let obj = expect_object(field, raw)?;
    let mut variants = Variants::new();

    for (utility, list) in obj.iter().filter(|(k, _)| *k != EXTEND_KEY) {
        variants.insert(utility.clone(), string_list(&field.key(utility), list)?);
    }

    if let Some(extend) = obj.get(EXTEND_KEY) {
        let extend_field = field.key(EXTEND_KEY);
        for (utility, list) in expect_object(&extend_field, extend)? {
            let extra = string_list(&extend_field.key(utility), list)?;
            let entry = variants.entry(utility.clone()).or_default();
            for variant in extra {
                if !entry.contains(&variant) {
                    entry.push(variant);
                }
            }
        }
    }

    Ok(variants)
}

fn resolve_plugins(field: &FieldPath, raw: Option<&Value>) -> ValidationResult<Vec<PluginRef>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    expect_array(field, raw)?
        .iter()
        .enumerate()
        .map(|(i, entry)| resolve_plugin(&field.index(i), entry))
        .collect()
}

fn resolve_plugin(field: &FieldPath, raw: &Value) -> ValidationResult<PluginRef> {
    let (name_field, name, options) = match raw {
        Value::String(name) => (field.clone(), name.as_str(), None),
        Value::Object(obj) => {
            let name_field = field.key("name");
            let name = match obj.get("name") {
                Some(name) => expect_str(&name_field, name)?,
                None => {
                    return Err(ValidationError::invalid_value(
                        field,
                        "an object with a \"name\"",
                        "an object without one",
                    ))
                }
            };
            let options = obj.get("options").filter(|v| !v.is_null()).cloned();
            (name_field, name, options)
        }
        other => {
            return Err(ValidationError::invalid_type(
                field,
                "string or object",
                other,
            ))
        }
    };
    if name.trim().is_empty() {
        return Err(ValidationError::invalid_value(
            &name_field,
            "a non-empty plugin name",
            format!("{:?}", name),
        ));
    }
    Ok(PluginRef {
        name: name.to_string(),
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use serde_json::json;

    fn resolve_json(value: Value) -> ValidationResult<Settings> {
        resolve(&RawConfig::from_value(value))
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let settings = resolve_json(json!({})).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_class_dark_mode_with_empty_extend() {
        let settings = resolve_json(json!({"darkMode": "class", "theme": {"extend": {}}})).unwrap();
        assert_eq!(settings.dark_mode_strategy, DarkModeStrategy::ClassBased);
        assert_eq!(settings.theme, Theme::defaults());
        assert!(settings.content_globs.is_empty());
    }

    #[test]
    fn test_bogus_mode_names_field() {
        let err = resolve_json(json!({"mode": "bogus"})).unwrap_err();
        assert_eq!(err.field(), "mode");
        assert_eq!(
            err,
            ValidationError::InvalidValue {
                field: "mode".into(),
                expected: "one of: aot, jit".into(),
                actual: "\"bogus\"".into(),
            }
        );
    }

    #[test]
    fn test_dark_mode_rejects_other_strings_and_types() {
        let err = resolve_json(json!({"darkMode": "auto"})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
        assert_eq!(err.field(), "darkMode");

        let err = resolve_json(json!({"darkMode": false})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidType { .. }));
    }

    #[test]
    fn test_null_top_level_is_absent() {
        let settings = resolve_json(json!({"mode": null, "plugins": null})).unwrap();
        assert_eq!(settings.mode, Mode::Aot);
        assert!(settings.plugins.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let settings = resolve_json(json!({"purge": ["x"], "future": {"flag": true}})).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_root_must_be_object() {
        let err = resolve_json(json!(["mode"])).unwrap_err();
        assert_eq!(err.field(), "(root)");
        assert!(matches!(err, ValidationError::InvalidType { .. }));
    }

    #[test]
    fn test_variants_extend_appends_once() {
        let settings = resolve_json(json!({
            "variants": {
                "opacity": ["hover"],
                "extend": {"opacity": ["focus", "hover"], "backgroundColor": ["active"]}
            }
        }))
        .unwrap();
        assert_eq!(settings.variants["opacity"], vec!["hover", "focus"]);
        assert_eq!(settings.variants["backgroundColor"], vec!["active"]);
        assert!(!settings.variants.contains_key("extend"));
    }

    #[test]
    fn test_variant_errors() {
        let err = resolve_json(json!({"variants": {"extend": {"opacity": [1]}}})).unwrap_err();
        assert_eq!(err.field(), "variants.extend.opacity[0]");
    }

    #[test]
    fn test_plugin_forms() {
        let settings = resolve_json(json!({
            "plugins": ["typography", {"name": "forms", "options": {"strategy": "class"}}]
        }))
        .unwrap();
        assert_eq!(settings.plugins[0], PluginRef::named("typography"));
        assert_eq!(settings.plugins[1].name, "forms");
        assert_eq!(settings.plugins[1].options, Some(json!({"strategy": "class"})));
    }

    #[test]
    fn test_plugin_errors() {
        let err = resolve_json(json!({"plugins": [42]})).unwrap_err();
        assert_eq!(err.field(), "plugins[0]");

        let err = resolve_json(json!({"plugins": [{"options": {}}]})).unwrap_err();
        assert_eq!(err.field(), "plugins[0]");

        let err = resolve_json(json!({"plugins": ["ok", {"name": ""}]})).unwrap_err();
        assert_eq!(err.field(), "plugins[1].name");

        let err = resolve_json(json!({"plugins": {}})).unwrap_err();
        assert_eq!(err.field(), "plugins");
    }

    #[test]
    fn test_mode_type_error() {
        let err = resolve_json(json!({"mode": 1})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid type for mode: expected string, got number"
        );
    }
}
