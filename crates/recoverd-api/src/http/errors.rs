//! API error wrapper for the `{ error, details }` JSON contract.
//!
//! # Design
//! - Carries the HTTP status plus the already-rendered caller-facing
//!   messages; the pipeline error mapping lives in one `From` impl so the
//!   status taxonomy has a single source of truth.
//! - Only reachable before streaming begins: once ZIP bytes are on the wire
//!   a failure can only truncate the body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recoverd_jobs::JobError;

use crate::models::ErrorBody;

/// Structured API error rendered as the JSON error body.
#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) error: String,
    pub(crate) details: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }

    pub(crate) fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub(crate) fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    pub(crate) fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<JobError> for ApiError {
    fn from(error: JobError) -> Self {
        match error {
            JobError::EmptySelection => Self::bad_request("Expected a non-empty file list"),
            JobError::TooManySelections { count, limit } => {
                Self::bad_request(format!("Too many files selected (max {limit})"))
                    .with_details(format!("{count} files requested"))
            }
            JobError::PathTraversal { name } => {
                Self::bad_request("Path traversal detected").with_details(name)
            }
            JobError::InvalidSelection { name, reason } => {
                Self::bad_request(format!("Invalid selection: {name}")).with_details(reason)
            }
            JobError::SelectionTooLarge {
                total_bytes,
                limit_bytes,
            } => Self::bad_request(format!("Selection too large (max {limit_bytes} bytes)"))
                .with_details(format!("{total_bytes} bytes selected")),
            JobError::WorkspacePreparation { source, .. } => {
                Self::internal("Failed to prepare temp workspace").with_details(source.to_string())
            }
            JobError::RecoveryLaunch { program, source } => {
                Self::internal("Failed to start recovery script")
                    .with_details(format!("{}: {source}", program.display()))
            }
            JobError::RecoveryFailed {
                code,
                signal,
                stderr,
            } => Self::internal("Recovery script failed")
                .with_details(render_recovery_failure(code, signal, &stderr)),
            JobError::RecoveryTimeout {
                timeout_secs,
                stderr,
            } => {
                let mut details = format!("killed after {timeout_secs}s");
                if !stderr.trim().is_empty() {
                    details.push_str(": ");
                    details.push_str(stderr.trim());
                }
                Self::internal("Recovery script timed out").with_details(details)
            }
            JobError::NoOutputsProduced => {
                Self::bad_request("No recovered files were produced")
            }
            JobError::ArchiveBuild { operation, .. } => {
                Self::internal("Failed to build archive").with_details(operation)
            }
            JobError::Io {
                operation, source, ..
            } => Self::internal("Internal filesystem failure")
                .with_details(format!("{operation}: {source}")),
        }
    }
}

fn render_recovery_failure(code: Option<i32>, signal: Option<i32>, stderr: &str) -> String {
    let mut details = code.map_or_else(
        || "terminated without exit code".to_string(),
        |code| format!("exited with code {code}"),
    );
    if let Some(signal) = signal {
        details.push_str(&format!(" (signal {signal})"));
    }
    if !stderr.trim().is_empty() {
        details.push_str(": ");
        details.push_str(stderr.trim());
    }
    details
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_errors_map_to_bad_request() {
        let error = ApiError::from(JobError::EmptySelection);
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error, "Expected a non-empty file list");

        let error = ApiError::from(JobError::TooManySelections {
            count: 300,
            limit: 200,
        });
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(error.error.contains("max 200"));

        let error = ApiError::from(JobError::NoOutputsProduced);
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(error.error.contains("No recovered files"));
    }

    #[test]
    fn recovery_failures_map_to_internal_with_diagnostics() {
        let error = ApiError::from(JobError::RecoveryFailed {
            code: Some(2),
            signal: None,
            stderr: "corrupt header\n".to_string(),
        });
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error, "Recovery script failed");
        let details = error.details.expect("details");
        assert!(details.contains("exited with code 2"));
        assert!(details.contains("corrupt header"));
    }

    #[test]
    fn signal_termination_is_rendered() {
        let error = ApiError::from(JobError::RecoveryFailed {
            code: None,
            signal: Some(9),
            stderr: String::new(),
        });
        let details = error.details.expect("details");
        assert!(details.contains("terminated without exit code"));
        assert!(details.contains("signal 9"));
    }
}
