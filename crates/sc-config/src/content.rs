//! Content globs: which source files the class scanner reads.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use serde_json::Value;
use std::path::{Component, Path, PathBuf};

use crate::validate::{expect_array, expect_str, FieldPath, ValidationError, ValidationResult};

/// Prefix marking an exclusion pattern (`!**/node_modules/**`).
pub const EXCLUDE_PREFIX: char = '!';

fn build_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}

/// Normalize `content` into an ordered, de-duplicated list of patterns.
///
/// Accepts `content: [..]` or `content: {files: [..]}`.
pub(crate) fn resolve_content(field: &FieldPath, raw: Option<&Value>) -> ValidationResult<Vec<String>> {
    let (files_field, files) = match raw {
        None => return Ok(Vec::new()),
        Some(Value::Array(_)) => (field.clone(), raw),
        Some(Value::Object(obj)) => {
            for key in obj.keys().filter(|k| k.as_str() != "files") {
                tracing::debug!(field = %field.key(key), "ignoring unsupported content option");
            }
            (field.key("files"), obj.get("files").filter(|v| !v.is_null()))
        }
        Some(other) => {
            return Err(ValidationError::invalid_type(
                field,
                "array or object with \"files\"",
                other,
            ))
        }
    };
    let Some(files) = files else {
        return Ok(Vec::new());
    };

    let mut globs: Vec<String> = Vec::new();
    for (idx, entry) in expect_array(&files_field, files)?.iter().enumerate() {
        let entry_field = files_field.index(idx);
        let pattern = expect_str(&entry_field, entry)?;
        validate_pattern(&entry_field, pattern)?;
        if globs.iter().any(|seen| seen == pattern) {
            tracing::debug!(field = %entry_field, pattern, "dropping duplicate content glob");
            continue;
        }
        globs.push(pattern.to_string());
    }
    Ok(globs)
}

fn validate_pattern(field: &FieldPath, pattern: &str) -> ValidationResult<()> {
    let body = pattern.strip_prefix(EXCLUDE_PREFIX).unwrap_or(pattern);
    if body.trim().is_empty() {
        return Err(ValidationError::invalid_value(
            field,
            "a non-empty glob pattern",
            format!("{:?}", pattern),
        ));
    }
    build_glob(body).map(|_| ()).map_err(|e| {
        ValidationError::invalid_value(
            field,
            "a valid glob pattern",
            format!("{:?} ({})", pattern, e.kind()),
        )
    })
}

/// Compiled include/exclude sets for the file scanner.
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    include: GlobSet,
    exclude: GlobSet,
}

impl ContentMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, globset::Error> {
        let mut include = GlobSetBuilder::new();
        let mut exclude = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match pattern.strip_prefix(EXCLUDE_PREFIX) {
                Some(negated) => exclude.add(build_glob(negated)?),
                None => include.add(build_glob(pattern)?),
            };
        }
        Ok(ContentMatcher {
            include: include.build()?,
            exclude: exclude.build()?,
        })
    }

    /// True when an include pattern matches and no exclude pattern does.
    ///
    /// Paths are project-relative; a leading `./` is ignored.
    pub fn is_match(&self, path: impl AsRef<Path>) -> bool {
        let path: PathBuf = path
            .as_ref()
            .components()
            .skip_while(|c| matches!(c, Component::CurDir))
            .collect();
        self.include.is_match(&path) && !self.exclude.is_match(&path)
    }

    /// No include patterns: nothing will be scanned.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }
}
