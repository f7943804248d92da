//! HTTP delivery surface for the recoverd service.
//!
//! # Design
//! - Thin axum layer over [`recoverd_jobs`]: handlers translate requests into
//!   pipeline calls and pipeline errors into the `{ error, details }` JSON
//!   contract.
//! - Layout: `http/router.rs` (server host and middleware), `http/files.rs`
//!   (directory listing), `http/recover.rs` (recovery jobs), `http/errors.rs`
//!   (API error wrapper), `models.rs` (shared DTOs).
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

/// Shared HTTP DTOs for the public API.
pub mod models;

mod error;
mod http;
mod state;

pub use error::ApiServerError;
pub use http::router::ApiServer;
