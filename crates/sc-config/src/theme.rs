//! Theme tokens: built-in defaults, deep merge, and typed views.
//!
//! A category set directly under `theme` replaces the default category. A
//! category under `theme.extend` is deep-merged on top of whatever is there.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::validate::{
    expect_bool, expect_object, expect_str, validate_length, FieldPath, ValidationError,
    ValidationResult,
};

/// Key under `theme` whose categories merge instead of replace.
pub const EXTEND_KEY: &str = "extend";

/// Pixels per `rem`/`em` when ordering breakpoints.
const ROOT_FONT_SIZE_PX: f64 = 16.0;

static DEFAULT_THEME: Lazy<Map<String, Value>> = Lazy::new(build_default_theme);

fn build_default_theme() -> Map<String, Value> {
    let mut theme = Map::new();
    theme.insert(
        "screens".into(),
        json!({
            "sm": "640px",
            "md": "768px",
            "lg": "1024px",
            "xl": "1280px",
            "2xl": "1536px"
        }),
    );
    theme.insert("container".into(), json!({}));
    theme.insert(
        "spacing".into(),
        json!({
            "px": "1px",
            "0": "0px",
            "0.5": "0.125rem",
            "1": "0.25rem",
            "2": "0.5rem",
            "3": "0.75rem",
            "4": "1rem",
            "6": "1.5rem",
            "8": "2rem",
            "12": "3rem",
            "16": "4rem",
            "24": "6rem",
            "32": "8rem",
            "64": "16rem"
        }),
    );
    theme.insert(
        "borderRadius".into(),
        json!({
            "none": "0px",
            "sm": "0.125rem",
            "DEFAULT": "0.25rem",
            "md": "0.375rem",
            "lg": "0.5rem",
            "full": "9999px"
        }),
    );
    theme.insert(
        "colors".into(),
        json!({
            "transparent": "transparent",
            "current": "currentColor",
            "black": "#000",
            "white": "#fff",
            "gray": {
                "100": "#f3f4f6",
                "500": "#6b7280",
                "900": "#111827"
            }
        }),
    );
    theme.insert(
        "fontFamily".into(),
        json!({
            "sans": ["ui-sans-serif", "system-ui", "sans-serif"],
            "serif": ["ui-serif", "Georgia", "serif"],
            "mono": ["ui-monospace", "SFMono-Regular", "monospace"]
        }),
    );
    theme.insert(
        "opacity".into(),
        json!({ "0": "0", "25": "0.25", "50": "0.5", "75": "0.75", "100": "1" }),
    );
    theme.insert(
        "zIndex".into(),
        json!({ "auto": "auto", "0": "0", "10": "10", "20": "20", "50": "50" }),
    );
    theme
}

/// The built-in default token tree. Never mutated; merges clone it.
pub fn default_theme() -> &'static Map<String, Value> {
    &DEFAULT_THEME
}

/// Merge `overlay` onto `base`: objects merge key by key, anything else in
/// the overlay replaces the base value.
pub fn deep_merge(base: Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                base.insert(key.clone(), merged);
            }
            Value::Object(base)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Resolved theme: category name to token tree, defaults already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Theme {
    tokens: Map<String, Value>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::defaults()
    }
}

impl Theme {
    pub fn defaults() -> Self {
        Theme {
            tokens: default_theme().clone(),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.tokens
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn get(&self, category: &str) -> Option<&Value> {
        self.tokens.get(category)
    }

    /// Look up a token by dotted path, e.g. `container.screens.2xl`.
    ///
    /// Keys that themselves contain dots (`spacing.0.5`) are matched greedily
    /// against the longest remaining key.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('.').collect();
        lookup_in(&self.tokens, &parts)
    }

    /// Theme breakpoints, ascending by minimum width. Queries without a
    /// minimum width (`raw`, max-only) sort last in declaration order.
    pub fn screens(&self) -> Vec<Breakpoint> {
        self.tokens
            .get("screens")
            .and_then(Value::as_object)
            .map(parse_screens_lenient)
            .unwrap_or_default()
    }

    /// Typed view of `theme.container`.
    pub fn container(&self) -> ContainerSettings {
        let container = self.tokens.get("container").and_then(Value::as_object);
        let center = container
            .and_then(|c| c.get("center"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let padding = container
            .and_then(|c| c.get("padding"))
            .and_then(Padding::from_value);
        let screens = match container
            .and_then(|c| c.get("screens"))
            .and_then(Value::as_object)
        {
            Some(own) => parse_screens_lenient(own),
            None => self.screens(),
        };
        ContainerSettings {
            center,
            padding,
            screens,
        }
    }
}

fn lookup_in<'a>(map: &'a Map<String, Value>, parts: &[&str]) -> Option<&'a Value> {
    for take in (1..=parts.len()).rev() {
        let key = parts[..take].join(".");
        if let Some(value) = map.get(&key) {
            let rest = &parts[take..];
            if rest.is_empty() {
                return Some(value);
            }
            if let Some(found) = value.as_object().and_then(|inner| lookup_in(inner, rest)) {
                return Some(found);
            }
        }
    }
    None
}

/// Media query shape of a breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenQuery {
    /// `"sm": "640px"`
    Min(String),
    /// `"md": {"min": "768px", "max": "1023px"}`
    Range {
        min: Option<String>,
        max: Option<String>,
    },
    /// `"print": {"raw": "print"}`
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakpoint {
    pub name: String,
    pub query: ScreenQuery,
}

impl Breakpoint {
    /// Minimum width in pixels, converting `rem`/`em` at 16px.
    pub fn min_width_px(&self) -> Option<f64> {
        match &self.query {
            ScreenQuery::Min(width) => length_to_px(width),
            ScreenQuery::Range { min: Some(width), .. } => length_to_px(width),
            _ => None,
        }
    }
}

fn length_to_px(length: &str) -> Option<f64> {
    if let Some(n) = length.strip_suffix("px") {
        return n.parse().ok();
    }
    length
        .strip_suffix("rem")
        .or_else(|| length.strip_suffix("em"))
        .and_then(|n| n.parse::<f64>().ok())
        .map(|n| n * ROOT_FONT_SIZE_PX)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(String),
    /// Keyed by screen name; `DEFAULT` applies below the first breakpoint.
    PerScreen(BTreeMap<String, String>),
}

impl Padding {
    fn from_value(value: &Value) -> Option<Padding> {
        match value {
            Value::String(s) => Some(Padding::Uniform(s.clone())),
            Value::Object(map) => Some(Padding::PerScreen(
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect(),
            )),
            _ => None,
        }
    }
}

/// Container utility settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerSettings {
    pub center: bool,
    pub padding: Option<Padding>,
    /// Own screens when configured, otherwise the theme screens.
    pub screens: Vec<Breakpoint>,
}

fn parse_screens_lenient(map: &Map<String, Value>) -> Vec<Breakpoint> {
    let mut screens: Vec<Breakpoint> = map
        .iter()
        .filter_map(|(name, value)| parse_screen(&FieldPath::root(), name, value).ok())
        .collect();
    sort_breakpoints(&mut screens);
    screens
}

fn sort_breakpoints(screens: &mut [Breakpoint]) {
    screens.sort_by(|a, b| match (a.min_width_px(), b.min_width_px()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

fn parse_screen(field: &FieldPath, name: &str, value: &Value) -> ValidationResult<Breakpoint> {
    let field = field.key(name);
    let query = match value {
        Value::String(width) => {
            validate_length(&field, value)?;
            ScreenQuery::Min(width.clone())
        }
        Value::Object(obj) => {
            if let Some(raw) = obj.get("raw") {
                if obj.contains_key("min") || obj.contains_key("max") {
                    return Err(ValidationError::invalid_value(
                        &field,
                        "either \"raw\" or \"min\"/\"max\"",
                        "both",
                    ));
                }
                ScreenQuery::Raw(expect_str(&field.key("raw"), raw)?.to_string())
            } else {
                let bound = |key: &str| -> ValidationResult<Option<String>> {
                    match obj.get(key) {
                        Some(v) => {
                            validate_length(&field.key(key), v)?;
                            Ok(v.as_str().map(str::to_string))
                        }
                        None => Ok(None),
                    }
                };
                let min = bound("min")?;
                let max = bound("max")?;
                if min.is_none() && max.is_none() {
                    return Err(ValidationError::invalid_value(
                        &field,
                        "an object with \"min\", \"max\" or \"raw\"",
                        "an empty object",
                    ));
                }
                ScreenQuery::Range { min, max }
            }
        }
        other => {
            return Err(ValidationError::invalid_type(
                &field,
                "string or object",
                other,
            ))
        }
    };
    Ok(Breakpoint {
        name: name.to_string(),
        query,
    })
}

fn validate_screens(field: &FieldPath, value: &Value) -> ValidationResult<()> {
    for (name, screen) in expect_object(field, value)? {
        parse_screen(field, name, screen)?;
    }
    Ok(())
}

fn validate_container(field: &FieldPath, value: &Value) -> ValidationResult<()> {
    let container = expect_object(field, value)?;
    if let Some(center) = container.get("center") {
        expect_bool(&field.key("center"), center)?;
    }
    if let Some(padding) = container.get("padding") {
        let padding_field = field.key("padding");
        match padding {
            Value::String(_) => {}
            Value::Object(per_screen) => {
                for (screen, value) in per_screen {
                    expect_str(&padding_field.key(screen), value)?;
                }
            }
            other => {
                return Err(ValidationError::invalid_type(
                    &padding_field,
                    "string or object",
                    other,
                ))
            }
        }
    }
    if let Some(screens) = container.get("screens") {
        validate_screens(&field.key("screens"), screens)?;
    }
    Ok(())
}

fn reject_nulls(field: &FieldPath, value: &Value) -> ValidationResult<()> {
    match value {
        Value::Null => Err(ValidationError::invalid_type(
            field,
            "string, number, boolean, array or object",
            value,
        )),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| reject_nulls(&field.index(i), item)),
        Value::Object(map) => map
            .iter()
            .try_for_each(|(key, item)| reject_nulls(&field.key(key), item)),
        _ => Ok(()),
    }
}

fn validate_category(field: &FieldPath, name: &str, value: &Value) -> ValidationResult<()> {
    expect_object(field, value)?;
    reject_nulls(field, value)?;
    match name {
        "screens" => validate_screens(field, value),
        "container" => validate_container(field, value),
        _ => Ok(()),
    }
}

/// Validate the raw `theme` value and merge it onto the defaults.
pub(crate) fn resolve_theme(field: &FieldPath, raw: Option<&Value>) -> ValidationResult<Theme> {
    let Some(raw) = raw else {
        return Ok(Theme::defaults());
    };
    let raw = expect_object(field, raw)?;
    let mut tokens = default_theme().clone();

    for (name, value) in raw.iter().filter(|(name, _)| *name != EXTEND_KEY) {
        validate_category(&field.key(name), name, value)?;
        tokens.insert(name.clone(), value.clone());
    }

    if let Some(extend) = raw.get(EXTEND_KEY) {
        let extend_field = field.key(EXTEND_KEY);
        for (name, value) in expect_object(&extend_field, extend)? {
            if name == EXTEND_KEY {
                return Err(ValidationError::invalid_value(
                    &extend_field.key(name),
                    "a theme category",
                    "a nested \"extend\"",
                ));
            }
            let category_field = extend_field.key(name);
            validate_category(&category_field, name, value)?;
            let merged = match tokens.remove(name) {
                Some(base) => deep_merge(base, value),
                None => value.clone(),
            };
            // A merged screen can combine keys that were valid on their own.
            validate_category(&category_field, name, &merged)?;
            tokens.insert(name.clone(), merged);
        }
    }

    tracing::trace!(categories = tokens.len(), "theme resolved");
    Ok(Theme { tokens })
}
