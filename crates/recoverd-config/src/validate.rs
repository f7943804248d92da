//! Settings validation.
//!
//! # Design
//! - Rejects configurations that would only fail later at request time, so
//!   misdeployments surface at startup instead.
//! - Path existence is deliberately not checked here: recordings volumes may
//!   be mounted after boot.

use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::model::Settings;

pub(crate) fn validate(settings: &Settings) -> ConfigResult<()> {
    if !settings.recordings_dir.is_absolute() {
        return Err(ConfigError::invalid_path(
            "RECOVERD_RECORDINGS_DIR",
            &settings.recordings_dir,
            "must be an absolute path",
        ));
    }
    if !settings.recover_script.is_absolute() {
        return Err(ConfigError::invalid_path(
            "RECOVERD_RECOVER_SCRIPT",
            &settings.recover_script,
            "must be an absolute path",
        ));
    }
    if !settings.scratch_root.is_absolute() {
        return Err(ConfigError::invalid_path(
            "RECOVERD_SCRATCH_DIR",
            &settings.scratch_root,
            "must be an absolute path",
        ));
    }
    if settings.limits.max_files == 0 {
        return Err(ConfigError::invalid_value(
            "RECOVERD_MAX_FILES",
            settings.limits.max_files.to_string(),
            "must be at least 1",
        ));
    }
    if settings.limits.max_total_bytes == 0 {
        return Err(ConfigError::invalid_value(
            "RECOVERD_MAX_TOTAL_BYTES",
            settings.limits.max_total_bytes.to_string(),
            "must be at least 1",
        ));
    }
    if settings.recover_timeout < Duration::from_secs(1) {
        return Err(ConfigError::invalid_value(
            "RECOVERD_RECOVER_TIMEOUT_SECS",
            settings.recover_timeout.as_secs().to_string(),
            "must be at least 1 second",
        ));
    }
    Ok(())
}
