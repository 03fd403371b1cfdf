//! Configuration validation errors and field-path bookkeeping.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
///
/// Every variant names the offending field path so the host build tool can
/// point the user at the exact key to fix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid type for {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid value for {field}: expected {expected}, got {actual}")]
    InvalidValue {
        field: String,
        expected: String,
        actual: String,
    },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::InvalidType { .. } => 62,
            ValidationError::InvalidValue { .. } => 65,
        }
    }

    /// Dotted path of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidType { field, .. } => field,
            ValidationError::InvalidValue { field, .. } => field,
        }
    }

    pub(crate) fn invalid_type(field: &FieldPath, expected: &str, actual: &Value) -> Self {
        ValidationError::InvalidType {
            field: field.to_string(),
            expected: expected.to_string(),
            actual: json_type_name(actual).to_string(),
        }
    }

    pub(crate) fn invalid_value(
        field: &FieldPath,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Location of a value inside the raw configuration tree.
///
/// Renders as `theme.container.screens.2xl` or `content.files[1]`; the
/// empty path renders as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

impl FieldPath {
    pub fn root() -> Self {
        FieldPath::default()
    }

    /// Child path for an object key.
    pub fn key(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Key(key.to_string()));
        next
    }

    /// Child path for an array index.
    pub fn index(&self, idx: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Index(idx));
        next
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{}", key)?,
                Segment::Key(key) => write!(f, ".{}", key)?,
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// Human name for the JSON type of a value.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn expect_object<'a>(
    field: &FieldPath,
    value: &'a Value,
) -> ValidationResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_type(field, "object", value))
}

pub(crate) fn expect_array<'a>(field: &FieldPath, value: &'a Value) -> ValidationResult<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ValidationError::invalid_type(field, "array", value))
}

pub(crate) fn expect_str<'a>(field: &FieldPath, value: &'a Value) -> ValidationResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::invalid_type(field, "string", value))
}

pub(crate) fn expect_bool(field: &FieldPath, value: &Value) -> ValidationResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::invalid_type(field, "boolean", value))
}

/// Parse a CSS length used for breakpoints and padding (`1400px`, `40rem`).
pub(crate) fn validate_length(field: &FieldPath, value: &Value) -> ValidationResult<()> {
    let text = expect_str(field, value)?;
    if is_css_length(text) {
        Ok(())
    } else {
        Err(ValidationError::invalid_value(
            field,
            "a length like \"640px\" or \"40rem\"",
            format!("{:?}", text),
        ))
    }
}

fn is_css_length(text: &str) -> bool {
    let number = ["px", "rem", "em"]
        .iter()
        .find_map(|unit| text.strip_suffix(unit));
    number.is_some_and(is_plain_decimal)
}

/// Digits with at most one `.`, e.g. `40`, `2.5`, `.5`. No sign or exponent.
fn is_plain_decimal(text: &str) -> bool {
    let mut digits = 0;
    let mut dots = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
