//! # Design
//!
//! - Server-host errors only; request-level failures are handled by the
//!   `ApiError` wrapper in the HTTP layer.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors produced while hosting the API server.
#[derive(Debug, Error)]
pub enum ApiServerError {
    /// The listener could not be bound.
    #[error("failed to bind api listener")]
    Bind {
        /// Address the bind was attempted on.
        addr: SocketAddr,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The server terminated unexpectedly.
    #[error("api server terminated")]
    Serve {
        /// Underlying IO error.
        source: io::Error,
    },
}
