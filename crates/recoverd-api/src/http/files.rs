//! Directory listing endpoint.
//!
//! # Design
//! - Read-only stat/readdir passthrough over the recordings directory for
//!   the operator UI's selection list.
//! - Only regular `.mcap` files are eligible; entries are sorted by name so
//!   responses stay deterministic.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use tokio::fs;

use crate::http::errors::ApiError;
use crate::models::{FileInfo, FileListResponse};
use crate::state::ApiState;

const ELIGIBLE_EXTENSION: &str = ".mcap";

pub(crate) async fn list_files(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<FileListResponse>, ApiError> {
    let dir = &state.settings.recordings_dir;
    let mut reader = fs::read_dir(dir).await.map_err(|error| {
        ApiError::internal("Failed to list recordings directory").with_details(error.to_string())
    })?;

    let mut files = Vec::new();
    while let Some(entry) = reader.next_entry().await.map_err(|error| {
        ApiError::internal("Failed to read recordings directory entry")
            .with_details(error.to_string())
    })? {
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(ELIGIBLE_EXTENSION) {
            continue;
        }
        let metadata = entry.metadata().await.map_err(|error| {
            ApiError::internal("Failed to stat recording").with_details(error.to_string())
        })?;
        if !metadata.is_file() {
            continue;
        }
        let modified_at = metadata
            .modified()
            .map_or_else(|_| Utc::now(), DateTime::<Utc>::from);
        // Not every filesystem records a birth time.
        let created_at = metadata
            .created()
            .map_or(modified_at, DateTime::<Utc>::from);
        files.push(FileInfo {
            name,
            size: metadata.len(),
            created_at,
            modified_at,
        });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(FileListResponse {
        dir: dir.to_string_lossy().to_string(),
        files,
    }))
}
