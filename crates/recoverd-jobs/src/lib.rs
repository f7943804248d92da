//! Recovery job pipeline for the recoverd service.
//!
//! # Design
//! - One job per request: validate the selection, stage it into an isolated
//!   workspace, run the external recovery executable, collect its outputs,
//!   and stream them back as a ZIP.
//! - Every failure path tears the workspace down before the error is
//!   returned; the success path tears it down when the stream finishes.
//! - Layout: `sandbox` (path containment), `workspace` (ephemeral dirs),
//!   `stage` (selection copying), `invoke` (subprocess), `collect` (output
//!   discovery), `archive` (streamed ZIP), `runner` (orchestration).
#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

mod archive;
mod collect;
mod error;
mod invoke;
mod model;
mod runner;
mod sandbox;
mod stage;
mod workspace;

pub use archive::write_archive;
pub use collect::{collect_outputs, expected_output_name};
pub use error::{JobError, JobResult};
pub use invoke::run_recovery;
pub use model::{JobArchive, RecoveryOutcome, StagedSelection};
pub use runner::JobRunner;
pub use sandbox::resolve_inside;
pub use stage::stage_selection;
pub use workspace::Workspace;
