//! Handler behaviour over the built router.
#![cfg(unix)]

use std::error::Error;
use std::io::{Cursor, Read};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use recoverd_api::ApiServer;
use recoverd_api::models::{ErrorBody, FileListResponse};
use recoverd_config::{Limits, Settings};
use tempfile::TempDir;
use tower::ServiceExt;
use zip::ZipArchive;

const COPY_SCRIPT: &str = r#"dir="$1"
shift
for name in "$@"; do
  cp "$dir/$name" "$dir/${name%.mcap}-rec.mcap"
done
"#;

struct Fixture {
    _recordings: TempDir,
    _scratch: TempDir,
    recordings: PathBuf,
    router: Router,
}

impl Fixture {
    fn new(script_body: &str) -> Result<Self, Box<dyn Error>> {
        let recordings = tempfile::Builder::new()
            .prefix("recoverd-http-recordings-")
            .tempdir()?;
        let scratch = tempfile::Builder::new()
            .prefix("recoverd-http-scratch-")
            .tempdir()?;
        let script = recordings.path().join("recover.sh");
        std::fs::write(&script, format!("#!/bin/sh\n{script_body}\n"))?;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;

        let settings = Arc::new(Settings {
            bind_addr: "127.0.0.1:0".parse()?,
            recordings_dir: recordings.path().to_path_buf(),
            recover_script: script,
            scratch_root: scratch.path().to_path_buf(),
            limits: Limits {
                max_files: 200,
                max_total_bytes: 5 * 1024 * 1024,
            },
            recover_timeout: Duration::from_secs(10),
        });
        let recordings_path = recordings.path().to_path_buf();
        Ok(Self {
            _recordings: recordings,
            _scratch: scratch,
            recordings: recordings_path,
            router: ApiServer::new(settings).into_router(),
        })
    }

    fn write_recording(&self, name: &str, content: &[u8]) -> Result<(), Box<dyn Error>> {
        std::fs::write(self.recordings.join(name), content)?;
        Ok(())
    }

    async fn get(&self, uri: &str) -> Result<axum::response::Response, Box<dyn Error>> {
        Ok(self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?)
    }

    async fn post_recover(&self, body: &str) -> Result<axum::response::Response, Box<dyn Error>> {
        Ok(self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/recover")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))?,
            )
            .await?)
    }
}

async fn body_bytes(response: axum::response::Response) -> Result<Vec<u8>, Box<dyn Error>> {
    Ok(to_bytes(response.into_body(), usize::MAX).await?.to_vec())
}

async fn error_body(response: axum::response::Response) -> Result<ErrorBody, Box<dyn Error>> {
    let bytes = body_bytes(response).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_reports_ok() -> Result<(), Box<dyn Error>> {
    let fixture = Fixture::new(COPY_SCRIPT)?;
    let response = fixture.get("/health").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await?;
    assert_eq!(bytes, br#"{"status":"ok"}"#);
    Ok(())
}

#[tokio::test]
async fn listing_returns_sorted_eligible_recordings() -> Result<(), Box<dyn Error>> {
    let fixture = Fixture::new(COPY_SCRIPT)?;
    fixture.write_recording("b.mcap", b"bravo")?;
    fixture.write_recording("a.mcap", b"al")?;
    fixture.write_recording("notes.txt", b"ignored")?;

    let response = fixture.get("/api/files").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await?;
    let listing: FileListResponse = serde_json::from_slice(&bytes)?;
    let names: Vec<_> = listing.files.iter().map(|file| file.name.as_str()).collect();
    assert_eq!(names, ["a.mcap", "b.mcap"]);
    assert_eq!(listing.files[0].size, 2);
    assert_eq!(listing.files[1].size, 5);
    Ok(())
}

#[tokio::test]
async fn recovery_streams_a_zip_attachment() -> Result<(), Box<dyn Error>> {
    let fixture = Fixture::new(COPY_SCRIPT)?;
    fixture.write_recording("a.mcap", b"alpha recording")?;

    let response = fixture.post_recover(r#"{"files":["a.mcap"]}"#).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/zip");
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"recovered_"));
    assert!(disposition.ends_with(".zip\""));

    let bytes = body_bytes(response).await?;
    let mut zip = ZipArchive::new(Cursor::new(bytes))?;
    assert_eq!(zip.len(), 1);
    let mut content = Vec::new();
    zip.by_name("a-rec.mcap")?.read_to_end(&mut content)?;
    assert_eq!(content, b"alpha recording");
    Ok(())
}

#[tokio::test]
async fn empty_file_lists_are_rejected() -> Result<(), Box<dyn Error>> {
    let fixture = Fixture::new(COPY_SCRIPT)?;
    let response = fixture.post_recover(r#"{"files":[]}"#).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await?;
    assert_eq!(body.error, "Expected a non-empty file list");
    Ok(())
}

#[tokio::test]
async fn invalid_json_bodies_are_rejected() -> Result<(), Box<dyn Error>> {
    let fixture = Fixture::new(COPY_SCRIPT)?;
    let response = fixture.post_recover("not json").await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await?;
    assert_eq!(body.error, "Invalid JSON body");
    Ok(())
}

#[tokio::test]
async fn missing_files_are_named_in_the_error() -> Result<(), Box<dyn Error>> {
    let fixture = Fixture::new(COPY_SCRIPT)?;
    let response = fixture.post_recover(r#"{"files":["x.mcap"]}"#).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await?;
    assert!(body.error.contains("x.mcap"));
    Ok(())
}

#[tokio::test]
async fn script_failures_surface_diagnostics() -> Result<(), Box<dyn Error>> {
    let fixture = Fixture::new("echo 'corrupt header' >&2\nexit 2")?;
    fixture.write_recording("a.mcap", b"data")?;

    let response = fixture.post_recover(r#"{"files":["a.mcap"]}"#).await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = error_body(response).await?;
    assert_eq!(body.error, "Recovery script failed");
    assert!(body.details.unwrap_or_default().contains("corrupt header"));
    Ok(())
}

#[tokio::test]
async fn zero_outputs_map_to_bad_request() -> Result<(), Box<dyn Error>> {
    let fixture = Fixture::new("exit 0")?;
    fixture.write_recording("a.mcap", b"data")?;

    let response = fixture.post_recover(r#"{"files":["a.mcap"]}"#).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await?;
    assert_eq!(body.error, "No recovered files were produced");
    Ok(())
}
