//! Path containment for caller-supplied file names.
//!
//! # Design
//! - Absolute names and `..` segments are rejected lexically before any
//!   filesystem access, so a traversal attempt fails the same way whether or
//!   not its target exists.
//! - Canonicalize both the base and the joined candidate, then require the
//!   result to equal the base or lie strictly within it. Canonicalization
//!   follows symlinks, so a link pointing outside the base is rejected too.
//! - Pure over path strings plus filesystem canonicalization; no writes.

use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs;

use crate::error::{JobError, JobResult};

/// Resolve `name` against `base`, rejecting any escape from `base`.
///
/// # Errors
///
/// Returns [`JobError::PathTraversal`] when the name is absolute, carries a
/// `..` segment, or canonically resolves outside `base`;
/// [`JobError::InvalidSelection`] when the name does not exist; and
/// [`JobError::Io`] for other canonicalization failures.
pub async fn resolve_inside(base: &Path, name: &str) -> JobResult<PathBuf> {
    let requested = Path::new(name);
    if requested.is_absolute()
        || requested
            .components()
            .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(JobError::traversal(name));
    }

    let base = fs::canonicalize(base)
        .await
        .map_err(|source| JobError::io("canonicalize_base", base, source))?;
    let candidate = base.join(name);
    let resolved = fs::canonicalize(&candidate)
        .await
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => JobError::invalid_selection(name, "file not found"),
            _ => JobError::io("canonicalize_selection", &candidate, source),
        })?;

    if resolved != base && !resolved.starts_with(&base) {
        return Err(JobError::traversal(name));
    }
    Ok(resolved)
}
