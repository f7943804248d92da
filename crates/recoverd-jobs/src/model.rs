//! Data carriers shared across pipeline stages.
//!
//! # Design
//! - Pure data; all behaviour lives in the stage modules.

use tokio::io::DuplexStream;
use tokio_util::io::ReaderStream;

/// Result of staging a selection into a job workspace.
#[derive(Debug, Clone)]
pub struct StagedSelection {
    /// Staged base names in request order, de-duplicated (duplicate requests
    /// land on the same destination file).
    pub names: Vec<String>,
    /// Total bytes staged, as reported by source file metadata.
    pub total_bytes: u64,
}

/// Terminal state of one recovery subprocess run.
#[derive(Debug, Clone)]
pub struct RecoveryOutcome {
    /// Exit code, absent when the process was terminated by a signal.
    pub code: Option<i32>,
    /// Terminating signal on unix platforms.
    pub signal: Option<i32>,
    /// Captured tail of the subprocess stderr.
    pub stderr: String,
}

impl RecoveryOutcome {
    /// Whether the run counts as successful (exit code zero).
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// A completed job's archive: the download file name and the ZIP byte stream.
///
/// The stream is single-pass and non-restartable; the job workspace is
/// removed once the producing task finishes, whether or not the consumer
/// read the stream to the end.
#[derive(Debug)]
pub struct JobArchive {
    /// Generated download file name, `recovered_<UTC timestamp>.zip`.
    pub file_name: String,
    /// Lazily produced ZIP bytes.
    pub stream: ReaderStream<DuplexStream>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_success_requires_exit_zero() {
        let ok = RecoveryOutcome {
            code: Some(0),
            signal: None,
            stderr: String::new(),
        };
        assert!(ok.success());

        let failed = RecoveryOutcome {
            code: Some(2),
            signal: None,
            stderr: String::new(),
        };
        assert!(!failed.success());

        let signalled = RecoveryOutcome {
            code: None,
            signal: Some(9),
            stderr: String::new(),
        };
        assert!(!signalled.success());
    }
}
