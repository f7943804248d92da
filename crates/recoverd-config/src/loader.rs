//! Environment loading for [`Settings`].
//!
//! # Design
//! - `from_env` is the only production entry point; `from_lookup` accepts an
//!   injected variable source so tests never mutate process environment.
//! - Defaults mirror the deployment contract: required paths have no default,
//!   ceilings and the bind address do.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{Limits, Settings};
use crate::validate::validate;

/// Default bind address when `RECOVERD_BIND_ADDR` is not provided.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Default per-job file count ceiling.
pub const DEFAULT_MAX_FILES: usize = 200;
/// Default per-job staged byte ceiling (5 GiB).
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 5 * 1024 * 1024 * 1024;
/// Default recovery subprocess timeout in seconds.
pub const DEFAULT_RECOVER_TIMEOUT_SECS: u64 = 600;

const ENV_BIND_ADDR: &str = "RECOVERD_BIND_ADDR";
const ENV_RECORDINGS_DIR: &str = "RECOVERD_RECORDINGS_DIR";
const ENV_RECOVER_SCRIPT: &str = "RECOVERD_RECOVER_SCRIPT";
const ENV_SCRATCH_DIR: &str = "RECOVERD_SCRATCH_DIR";
const ENV_MAX_FILES: &str = "RECOVERD_MAX_FILES";
const ENV_MAX_TOTAL_BYTES: &str = "RECOVERD_MAX_TOTAL_BYTES";
const ENV_RECOVER_TIMEOUT_SECS: &str = "RECOVERD_RECOVER_TIMEOUT_SECS";

impl Settings {
    /// Load and validate settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value fails to
    /// parse, or validation rejects the resolved settings.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load and validate settings from an injected variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value fails to
    /// parse, or validation rejects the resolved settings.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let bind_addr = parse_with_default::<SocketAddr>(
            &lookup,
            ENV_BIND_ADDR,
            DEFAULT_BIND_ADDR,
            "not a socket address",
        )?;
        let recordings_dir = required_path(&lookup, ENV_RECORDINGS_DIR)?;
        let recover_script = required_path(&lookup, ENV_RECOVER_SCRIPT)?;
        let scratch_root = lookup(ENV_SCRATCH_DIR)
            .map_or_else(std::env::temp_dir, PathBuf::from);
        let max_files = parse_with_default::<usize>(
            &lookup,
            ENV_MAX_FILES,
            &DEFAULT_MAX_FILES.to_string(),
            "not an integer",
        )?;
        let max_total_bytes = parse_with_default::<u64>(
            &lookup,
            ENV_MAX_TOTAL_BYTES,
            &DEFAULT_MAX_TOTAL_BYTES.to_string(),
            "not an integer",
        )?;
        let timeout_secs = parse_with_default::<u64>(
            &lookup,
            ENV_RECOVER_TIMEOUT_SECS,
            &DEFAULT_RECOVER_TIMEOUT_SECS.to_string(),
            "not an integer",
        )?;

        let settings = Self {
            bind_addr,
            recordings_dir,
            recover_script,
            scratch_root,
            limits: Limits {
                max_files,
                max_total_bytes,
            },
            recover_timeout: Duration::from_secs(timeout_secs),
        };
        validate(&settings)?;
        Ok(settings)
    }
}

fn required_path(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> ConfigResult<PathBuf> {
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::missing(name))
}

fn parse_with_default<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
    reason: &'static str,
) -> ConfigResult<T> {
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    raw.parse::<T>()
        .map_err(|_| ConfigError::invalid_value(name, raw, reason))
}
