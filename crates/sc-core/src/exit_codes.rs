//! Exit codes for the stylecfg CLI.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/configuration errors (fixed by editing config or arguments)
//! - 20-29: Internal errors (bugs, should be reported)

use sc_config::LoadError;

/// Exit codes for stylecfg operations.
///
/// These codes are a stable contract for build tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Configuration Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Configuration failed to parse or validate
    ConfigInvalid = 11,

    /// Configuration file not found
    ConfigNotFound = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Check if this exit code is a user/configuration error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        let code = self as i32;
        (10..20).contains(&code)
    }

    /// Check if this exit code is an internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigInvalid => "ERR_CONFIG_INVALID",
            ExitCode::ConfigNotFound => "ERR_CONFIG_NOT_FOUND",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&LoadError> for ExitCode {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::NotFound { .. } => ExitCode::ConfigNotFound,
            LoadError::IoError { .. } => ExitCode::IoError,
            LoadError::UnsupportedFormat { .. }
            | LoadError::ParseError { .. }
            | LoadError::ValidationError(_) => ExitCode::ConfigInvalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(ExitCode::ConfigInvalid.is_user_error());
        assert!(ExitCode::ConfigNotFound.is_user_error());
        assert!(!ExitCode::IoError.is_user_error());
        assert!(ExitCode::IoError.is_internal_error());
        assert_eq!(ExitCode::ConfigInvalid.as_i32(), 11);
    }

    #[test]
    fn test_from_load_error() {
        let err = LoadError::NotFound {
            path: PathBuf::from("style.config.json"),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::ConfigNotFound);

        let err = LoadError::UnsupportedFormat {
            path: PathBuf::from("tailwind.config.js"),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::ConfigInvalid);
        assert_eq!(ExitCode::from(&err).code_name(), "ERR_CONFIG_INVALID");
    }
}
