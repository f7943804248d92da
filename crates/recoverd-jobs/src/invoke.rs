//! Recovery subprocess invocation.
//!
//! # Design
//! - One blocking unit from the orchestrator's perspective: the call resolves
//!   once with the process outcome, never a sequence of events.
//! - Stderr is drained incrementally into a bounded tail buffer, so a
//!   verbose failing script cannot grow memory without bound.
//! - On timeout the script's whole process group is killed and the direct
//!   child reaped before the error is returned; no retry is ever attempted.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::{Child, ChildStderr, Command};
use tokio::time;

use crate::error::{JobError, JobResult};
use crate::model::RecoveryOutcome;
use crate::workspace::Workspace;

/// Retained tail of the subprocess stderr.
const STDERR_CAPTURE_BYTES: usize = 64 * 1024;

/// How long the killed-on-timeout path waits for the stderr pipe to close.
/// Processes that escaped the job's process group can still hold the write
/// end open; the capture is abandoned rather than waited on.
const STDERR_DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Run the recovery executable against a staged workspace.
///
/// The executable is invoked as `script <input_dir> <name...>` with the
/// workspace root as working directory. Returns the outcome for any exit,
/// successful or not; the orchestrator decides how a non-zero exit maps onto
/// the job result.
///
/// # Errors
///
/// Returns [`JobError::RecoveryLaunch`] when the process cannot be started,
/// [`JobError::RecoveryTimeout`] when it outlives `timeout`, and
/// [`JobError::Io`] when waiting on the child fails.
pub async fn run_recovery(
    script: &Path,
    workspace: &Workspace,
    staged_names: &[String],
    timeout: Duration,
) -> JobResult<RecoveryOutcome> {
    let mut command = Command::new(script);
    command
        .arg(workspace.input())
        .args(staged_names)
        .current_dir(workspace.root())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    // Own process group, so a timeout can take down the script's children too.
    #[cfg(unix)]
    command.process_group(0);
    let mut child = command
        .spawn()
        .map_err(|source| JobError::recovery_launch(script, source))?;

    let mut capture = tokio::spawn(capture_stderr(child.stderr.take()));

    let status = match time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(source)) => return Err(JobError::io("wait_recovery", script, source)),
        Err(_elapsed) => {
            kill_job_processes(&mut child);
            let _ = child.wait().await;
            let stderr = match time::timeout(STDERR_DRAIN_GRACE, &mut capture).await {
                Ok(captured) => captured.unwrap_or_default(),
                Err(_elapsed) => {
                    capture.abort();
                    String::new()
                }
            };
            return Err(JobError::RecoveryTimeout {
                timeout_secs: timeout.as_secs(),
                stderr,
            });
        }
    };
    let stderr = capture.await.unwrap_or_default();

    #[cfg(unix)]
    let signal = {
        use std::os::unix::process::ExitStatusExt;
        status.signal()
    };
    #[cfg(not(unix))]
    let signal = None;

    Ok(RecoveryOutcome {
        code: status.code(),
        signal,
        stderr,
    })
}

#[cfg(unix)]
fn kill_job_processes(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    if let Some(pid) = child.id().and_then(|pid| i32::try_from(pid).ok()) {
        killpg(Pid::from_raw(pid), Signal::SIGKILL).ok();
    }
    child.start_kill().ok();
}

#[cfg(not(unix))]
fn kill_job_processes(child: &mut Child) {
    child.start_kill().ok();
}

async fn capture_stderr(stderr: Option<ChildStderr>) -> String {
    let Some(mut stderr) = stderr else {
        return String::new();
    };
    let mut captured = Vec::new();
    let mut chunk = [0_u8; 8192];
    loop {
        match stderr.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(read) => {
                captured.extend_from_slice(&chunk[..read]);
                if captured.len() > STDERR_CAPTURE_BYTES {
                    let excess = captured.len() - STDERR_CAPTURE_BYTES;
                    captured.drain(..excess);
                }
            }
        }
    }
    String::from_utf8_lossy(&captured).into_owned()
}
