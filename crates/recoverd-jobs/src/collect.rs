//! Output discovery after a recovery run.
//!
//! # Design
//! - Outputs are discovered by the fixed naming convention, never by
//!   directory scan: only files mapping back to a requested input enter the
//!   archive. Whatever else the script leaves behind is ignored here and
//!   disposed of by workspace teardown.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use tokio::fs;

use crate::error::{JobError, JobResult};

/// Expected output name for a staged input: `-rec` inserted before the
/// extension (`a.mcap` becomes `a-rec.mcap`, extensionless `a` becomes
/// `a-rec`).
#[must_use]
pub fn expected_output_name(input: &str) -> String {
    match input.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{stem}-rec.{extension}"),
        _ => format!("{input}-rec"),
    }
}

/// Discover which expected outputs the recovery run actually produced.
///
/// Results preserve request order and are de-duplicated; only regular files
/// are included.
///
/// # Errors
///
/// Returns [`JobError::NoOutputsProduced`] when no requested input has a
/// matching output, and [`JobError::Io`] for stat failures other than
/// not-found.
pub async fn collect_outputs(input_dir: &Path, requested: &[String]) -> JobResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut outputs = Vec::new();
    for name in requested {
        let candidate = expected_output_name(name);
        if !seen.insert(candidate.clone()) {
            continue;
        }
        let path = input_dir.join(&candidate);
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => outputs.push(candidate),
            Ok(_) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(JobError::io("stat_output", &path, error)),
        }
    }
    if outputs.is_empty() {
        return Err(JobError::NoOutputsProduced);
    }
    Ok(outputs)
}
