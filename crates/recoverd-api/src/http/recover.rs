//! Recovery endpoint.
//!
//! # Design
//! - Delegates the whole job to [`recoverd_jobs::JobRunner`]; by the time a
//!   response exists the workspace is either streaming or already removed.
//! - The ZIP body is streamed; errors after the first byte can only truncate
//!   the response, so everything that can be validated happens before the
//!   stream starts.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::Response,
};
use tracing::info;

use crate::http::errors::ApiError;
use crate::models::RecoverRequest;
use crate::state::ApiState;

pub(crate) async fn recover_and_zip(
    State(state): State<Arc<ApiState>>,
    request: Result<Json<RecoverRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = request.map_err(|rejection| {
        ApiError::bad_request("Invalid JSON body").with_details(rejection.body_text())
    })?;

    let archive = state.runner.run(request.files).await?;
    info!(file_name = %archive.file_name, "streaming recovered archive");

    let disposition = format!("attachment; filename=\"{}\"", archive.file_name);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(archive.stream))
        .map_err(|error| {
            ApiError::internal("Failed to build archive response").with_details(error.to_string())
        })
}
