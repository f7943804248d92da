//! Environment-sourced configuration for the recoverd service.
//!
//! # Design
//! - Settings are read once at startup and immutable afterwards; request
//!   handlers receive a shared snapshot and never consult the environment.
//! - Keeps domain types (`model`), environment loading (`loader`), and
//!   validation (`validate`) in separate modules.
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

mod error;
mod loader;
mod model;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{DEFAULT_BIND_ADDR, DEFAULT_MAX_FILES, DEFAULT_MAX_TOTAL_BYTES, DEFAULT_RECOVER_TIMEOUT_SECS};
pub use model::{Limits, Settings};
