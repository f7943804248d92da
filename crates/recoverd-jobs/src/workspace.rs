//! Ephemeral per-job workspaces.
//!
//! # Design
//! - Each job owns `<scratch_root>/recoverjob-<uuid>/input`; the UUID keeps
//!   concurrent jobs from observing each other's partial state.
//! - Teardown is idempotent and never fails the job: a missing directory is
//!   success, anything else is logged at warn and swallowed.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::error::{JobError, JobResult};

/// Handle to one job's ephemeral working directory tree.
#[derive(Debug)]
pub struct Workspace {
    id: Uuid,
    root: PathBuf,
    input: PathBuf,
}

impl Workspace {
    /// Create a fresh workspace under `scratch_root`.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::WorkspacePreparation`] when the directory tree
    /// cannot be created.
    pub async fn create(scratch_root: &Path) -> JobResult<Self> {
        let id = Uuid::new_v4();
        let root = scratch_root.join(format!("recoverjob-{id}"));
        let input = root.join("input");
        fs::create_dir_all(&input)
            .await
            .map_err(|source| JobError::workspace_preparation(&root, source))?;
        Ok(Self { id, root, input })
    }

    /// Job identifier the workspace was created for.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Workspace root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Input directory files are staged into and outputs are read from.
    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Recursively remove the workspace tree.
    ///
    /// Idempotent: removing an already-removed workspace is a no-op, and
    /// other failures are logged rather than propagated so teardown can run
    /// on every exit path.
    pub async fn remove(&self) {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => {
                warn!(
                    workspace = %self.root.display(),
                    error = %error,
                    "failed to remove job workspace"
                );
            }
        }
    }
}
