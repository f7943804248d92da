//! Selection staging into a job workspace.
//!
//! # Design
//! - Two phases: every name is resolved and stat'd before any byte is
//!   copied, so a traversal or invalid selection anywhere in the list means
//!   no copy happens at all.
//! - Destinations use only the base name of the caller-supplied string, so
//!   the write side cannot escape the workspace either.
//! - The byte total is accumulated from source metadata; the orchestrator
//!   compares it against the configured ceiling after staging completes.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{JobError, JobResult};
use crate::model::StagedSelection;
use crate::sandbox::resolve_inside;

/// Copy the requested `names` from `base` into `input_dir`.
///
/// Names are processed in request order; duplicates are staged once.
///
/// # Errors
///
/// Returns sandbox errors from [`resolve_inside`],
/// [`JobError::InvalidSelection`] for non-regular files, and [`JobError::Io`]
/// for stat/copy failures.
pub async fn stage_selection(
    base: &Path,
    names: &[String],
    input_dir: &Path,
) -> JobResult<StagedSelection> {
    let mut sources: Vec<(String, PathBuf)> = Vec::with_capacity(names.len());
    let mut total_bytes: u64 = 0;

    for name in names {
        let source = resolve_inside(base, name).await?;
        let metadata = fs::metadata(&source)
            .await
            .map_err(|error| JobError::io("stat_selection", &source, error))?;
        if !metadata.is_file() {
            return Err(JobError::invalid_selection(name, "not a regular file"));
        }
        let base_name = source
            .file_name()
            .and_then(|value| value.to_str())
            .ok_or_else(|| JobError::invalid_selection(name, "unrepresentable file name"))?
            .to_string();
        if sources.iter().any(|(staged, _)| staged == &base_name) {
            continue;
        }
        total_bytes = total_bytes.saturating_add(metadata.len());
        sources.push((base_name, source));
    }

    for (base_name, source) in &sources {
        let destination = input_dir.join(base_name);
        fs::copy(source, &destination)
            .await
            .map_err(|error| JobError::io("copy_selection", &destination, error))?;
    }

    Ok(StagedSelection {
        names: sources.into_iter().map(|(name, _)| name).collect(),
        total_bytes,
    })
}
