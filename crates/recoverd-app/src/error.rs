//! # Design
//!
//! - Centralize application-level errors for bootstrap and serving.
//! - Keep error messages constant while carrying context fields for
//!   debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading or validation failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: recoverd_config::ConfigError,
    },
    /// Telemetry installation failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: anyhow::Error,
    },
    /// API server operations failed.
    #[error("api server operation failed")]
    ApiServer {
        /// Operation identifier.
        operation: &'static str,
        /// Source API server error.
        source: recoverd_api::ApiServerError,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: recoverd_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn api_server(
        operation: &'static str,
        source: recoverd_api::ApiServerError,
    ) -> Self {
        Self::ApiServer { operation, source }
    }
}
