//! Application boot sequence.
//!
//! # Design
//! - Install logging first so configuration failures are visible.
//! - Resolve settings once from the environment, then hand an immutable
//!   snapshot to the API server; nothing reads the environment after boot.

use std::sync::Arc;

use recoverd_api::ApiServer;
use recoverd_config::Settings;
use recoverd_telemetry::{LoggingConfig, init_logging};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Entry point for the recoverd application boot sequence.
///
/// # Errors
///
/// Returns an error if logging cannot be installed, settings fail to load,
/// or the HTTP server terminates unexpectedly.
pub async fn run_app() -> AppResult<()> {
    let logging = LoggingConfig::default();
    init_logging(&logging).map_err(|source| AppError::telemetry("init_logging", source))?;

    let settings =
        Settings::from_env().map_err(|source| AppError::config("settings.from_env", source))?;
    info!(
        bind_addr = %settings.bind_addr,
        recordings_dir = %settings.recordings_dir.display(),
        recover_script = %settings.recover_script.display(),
        scratch_root = %settings.scratch_root.display(),
        max_files = settings.limits.max_files,
        max_total_bytes = settings.limits.max_total_bytes,
        recover_timeout_secs = settings.recover_timeout.as_secs(),
        "starting recoverd"
    );

    let bind_addr = settings.bind_addr;
    let server = ApiServer::new(Arc::new(settings));
    server
        .serve(bind_addr)
        .await
        .map_err(|source| AppError::api_server("serve", source))?;
    Ok(())
}
