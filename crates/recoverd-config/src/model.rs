//! Typed configuration models.
//!
//! # Design
//! - Pure data carriers shared by the pipeline and the HTTP surface.
//! - Loading and validation live in `loader` and `validate`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Per-job selection ceilings enforced before recovery is invoked.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of files accepted in a single recovery request.
    pub max_files: usize,
    /// Maximum total bytes staged into a single job workspace.
    pub max_total_bytes: u64,
}

/// Immutable process-wide settings, resolved once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Directory holding the recorded source files callers select from.
    pub recordings_dir: PathBuf,
    /// External recovery executable invoked against each job workspace.
    pub recover_script: PathBuf,
    /// Root directory under which per-job workspaces are created.
    pub scratch_root: PathBuf,
    /// Selection ceilings applied to each job.
    pub limits: Limits,
    /// Wall-clock ceiling for a single recovery subprocess run.
    #[serde(with = "duration_secs")]
    pub recover_timeout: Duration,
}

mod duration_secs {
    use std::time::Duration;

    use serde::Serializer;

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }
}
