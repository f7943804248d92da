//! # Design
//!
//! - Constant error messages with context fields, so failures render the same
//!   way in logs and tests.
//! - Startup-only errors: nothing here is surfaced to HTTP callers.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration loading and validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors produced while loading or validating service settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was absent.
    #[error("missing environment variable")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// An environment variable held a value that could not be parsed.
    #[error("invalid configuration value")]
    InvalidValue {
        /// Name of the offending variable.
        name: &'static str,
        /// Raw value as read from the environment.
        value: String,
        /// Static reason the value was rejected.
        reason: &'static str,
    },
    /// A configured path failed validation.
    #[error("invalid configuration path")]
    InvalidPath {
        /// Name of the offending variable.
        name: &'static str,
        /// Path as resolved from the environment.
        path: PathBuf,
        /// Static reason the path was rejected.
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) const fn missing(name: &'static str) -> Self {
        Self::MissingEnv { name }
    }

    pub(crate) const fn invalid_value(
        name: &'static str,
        value: String,
        reason: &'static str,
    ) -> Self {
        Self::InvalidValue {
            name,
            value,
            reason,
        }
    }

    pub(crate) fn invalid_path(
        name: &'static str,
        path: impl Into<PathBuf>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidPath {
            name,
            path: path.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_helpers_build_variants() {
        let missing = ConfigError::missing("RECOVERD_RECORDINGS_DIR");
        assert!(matches!(missing, ConfigError::MissingEnv { .. }));

        let invalid = ConfigError::invalid_value("RECOVERD_MAX_FILES", "nope".into(), "not an integer");
        assert!(matches!(invalid, ConfigError::InvalidValue { .. }));

        let path = ConfigError::invalid_path("RECOVERD_RECORDINGS_DIR", "relative/dir", "must be absolute");
        assert!(matches!(path, ConfigError::InvalidPath { .. }));
    }
}
