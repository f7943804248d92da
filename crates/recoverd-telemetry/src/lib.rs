//! Telemetry primitives shared across the recoverd workspace.
//!
//! This crate centralises logging setup and request-id middleware so the
//! application and delivery surfaces adopt a consistent observability story.
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

mod init;
mod layers;

pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use layers::{propagate_request_id_layer, set_request_id_layer};
