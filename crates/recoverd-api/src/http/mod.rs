//! HTTP handlers, error wrapper, and router construction.

pub(crate) mod errors;
pub(crate) mod files;
pub(crate) mod health;
pub(crate) mod recover;
pub(crate) mod router;
