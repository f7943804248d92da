//! # Design
//!
//! - Structured, constant-message errors for the recovery pipeline.
//! - Capture operation context (names, paths, limits, captured stderr) so
//!   failures are reproducible in tests and map cleanly onto HTTP statuses.
//! - Preserve source errors without interpolating context into messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::RecoveryOutcome;

/// Result type for recovery job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Errors produced by the recovery job pipeline.
#[derive(Debug, Error)]
pub enum JobError {
    /// The request carried no file names.
    #[error("empty file selection")]
    EmptySelection,
    /// The request carried more file names than the configured ceiling.
    #[error("too many files selected")]
    TooManySelections {
        /// Number of files in the request.
        count: usize,
        /// Configured per-job file count ceiling.
        limit: usize,
    },
    /// A requested name resolved outside the recordings directory.
    #[error("path traversal detected")]
    PathTraversal {
        /// Caller-supplied name that escaped the sandbox.
        name: String,
    },
    /// A requested name did not denote a stageable regular file.
    #[error("invalid selection")]
    InvalidSelection {
        /// Caller-supplied name that failed validation.
        name: String,
        /// Static reason the name was rejected.
        reason: &'static str,
    },
    /// The staged selection exceeded the configured byte ceiling.
    #[error("selection too large")]
    SelectionTooLarge {
        /// Total bytes staged for the job.
        total_bytes: u64,
        /// Configured per-job byte ceiling.
        limit_bytes: u64,
    },
    /// The job workspace could not be created.
    #[error("workspace preparation failed")]
    WorkspacePreparation {
        /// Workspace root that could not be created.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The recovery executable could not be started at all.
    #[error("recovery script failed to start")]
    RecoveryLaunch {
        /// Configured recovery executable.
        program: PathBuf,
        /// Underlying spawn error.
        source: io::Error,
    },
    /// The recovery executable ran but exited unsuccessfully.
    #[error("recovery script failed")]
    RecoveryFailed {
        /// Exit code, absent when the process was terminated by a signal.
        code: Option<i32>,
        /// Terminating signal on unix platforms.
        signal: Option<i32>,
        /// Captured tail of the subprocess stderr.
        stderr: String,
    },
    /// The recovery executable outlived the configured timeout and was killed.
    #[error("recovery script timed out")]
    RecoveryTimeout {
        /// Configured timeout in seconds.
        timeout_secs: u64,
        /// Captured tail of the subprocess stderr before the kill.
        stderr: String,
    },
    /// Recovery ran successfully but produced no expected output files.
    #[error("no recovered files were produced")]
    NoOutputsProduced,
    /// Archive construction failed mid-stream.
    #[error("archive build failed")]
    ArchiveBuild {
        /// Operation that triggered the archive failure.
        operation: &'static str,
        /// Path involved in the archive failure.
        path: PathBuf,
        /// Underlying zip error.
        source: async_zip::error::ZipError,
    },
    /// IO failures while interacting with the filesystem.
    #[error("job io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl JobError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn traversal(name: impl Into<String>) -> Self {
        Self::PathTraversal { name: name.into() }
    }

    pub(crate) fn invalid_selection(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidSelection {
            name: name.into(),
            reason,
        }
    }

    pub(crate) fn workspace_preparation(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WorkspacePreparation {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn recovery_launch(program: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::RecoveryLaunch {
            program: program.into(),
            source,
        }
    }

    pub(crate) fn recovery_failed(outcome: RecoveryOutcome) -> Self {
        Self::RecoveryFailed {
            code: outcome.code,
            signal: outcome.signal,
            stderr: outcome.stderr,
        }
    }

    pub(crate) fn archive(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: async_zip::error::ZipError,
    ) -> Self {
        Self::ArchiveBuild {
            operation,
            path: path.into(),
            source,
        }
    }
}
