//! Job orchestration.
//!
//! # Design
//! - Drives one job through validate, stage, recover, collect, and stream;
//!   every failure tears the workspace down before the error is returned.
//! - On success the archive is produced by a spawned task writing into a
//!   bounded duplex pipe; the HTTP body reads the other end, so producer
//!   progress is paced by the consumer. The task removes the workspace when
//!   it finishes, which covers success, mid-stream failure, and consumer
//!   disconnect (the pipe write fails once the reader is dropped).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use recoverd_config::Settings;
use tokio::io::duplex;
use tokio_util::io::ReaderStream;
use tracing::{info, warn};

use crate::collect::collect_outputs;
use crate::error::{JobError, JobResult};
use crate::invoke::run_recovery;
use crate::model::JobArchive;
use crate::stage::stage_selection;
use crate::workspace::Workspace;

/// In-flight window between the archive producer and the HTTP response.
const DUPLEX_BUFFER_BYTES: usize = 256 * 1024;

#[derive(Clone, Copy)]
enum JobStep {
    Validated,
    Staged,
    Recovered,
    Collected,
    Streaming,
}

impl JobStep {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Staged => "staged",
            Self::Recovered => "recovered",
            Self::Collected => "collected",
            Self::Streaming => "streaming",
        }
    }
}

/// Orchestrates recovery jobs against the process-wide settings.
#[derive(Clone)]
pub struct JobRunner {
    settings: Arc<Settings>,
}

impl JobRunner {
    /// Construct a runner over the immutable service settings.
    #[must_use]
    pub const fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Run one recovery job for the requested file names.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure; by the time an error is returned the
    /// job workspace no longer exists.
    pub async fn run(&self, requested: Vec<String>) -> JobResult<JobArchive> {
        if requested.is_empty() {
            return Err(JobError::EmptySelection);
        }
        let limits = self.settings.limits;
        if requested.len() > limits.max_files {
            return Err(JobError::TooManySelections {
                count: requested.len(),
                limit: limits.max_files,
            });
        }

        let workspace = Workspace::create(&self.settings.scratch_root).await?;
        let job_id = workspace.id();
        info!(
            job_id = %job_id,
            requested = requested.len(),
            step = JobStep::Validated.as_str(),
            "recovery job accepted"
        );

        let staged = match stage_selection(
            &self.settings.recordings_dir,
            &requested,
            workspace.input(),
        )
        .await
        {
            Ok(staged) => staged,
            Err(error) => return Err(fail(workspace, error).await),
        };
        if staged.total_bytes > limits.max_total_bytes {
            let error = JobError::SelectionTooLarge {
                total_bytes: staged.total_bytes,
                limit_bytes: limits.max_total_bytes,
            };
            return Err(fail(workspace, error).await);
        }
        info!(
            job_id = %job_id,
            staged = staged.names.len(),
            total_bytes = staged.total_bytes,
            step = JobStep::Staged.as_str(),
            "selection staged"
        );

        let outcome = match run_recovery(
            &self.settings.recover_script,
            &workspace,
            &staged.names,
            self.settings.recover_timeout,
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(error) => return Err(fail(workspace, error).await),
        };
        if !outcome.success() {
            return Err(fail(workspace, JobError::recovery_failed(outcome)).await);
        }
        info!(job_id = %job_id, step = JobStep::Recovered.as_str(), "recovery script succeeded");

        let outputs = match collect_outputs(workspace.input(), &staged.names).await {
            Ok(outputs) => outputs,
            Err(error) => return Err(fail(workspace, error).await),
        };
        info!(
            job_id = %job_id,
            outputs = outputs.len(),
            step = JobStep::Collected.as_str(),
            "outputs collected"
        );

        let (reader, writer) = duplex(DUPLEX_BUFFER_BYTES);
        let input_dir = workspace.input().to_path_buf();
        tokio::spawn(async move {
            if let Err(error) = crate::archive::write_archive(&input_dir, &outputs, writer).await {
                warn!(job_id = %job_id, error = ?error, "archive stream aborted");
            }
            workspace.remove().await;
        });
        info!(job_id = %job_id, step = JobStep::Streaming.as_str(), "streaming archive");

        Ok(JobArchive {
            file_name: archive_file_name(Utc::now()),
            stream: ReaderStream::new(reader),
        })
    }
}

async fn fail(workspace: Workspace, error: JobError) -> JobError {
    warn!(job_id = %workspace.id(), error = ?error, "recovery job failed");
    workspace.remove().await;
    error
}

fn archive_file_name(at: DateTime<Utc>) -> String {
    format!("recovered_{}.zip", at.format("%Y-%m-%d-%H-%M-%S"))
}
