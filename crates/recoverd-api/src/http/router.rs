//! Router construction and server host for the API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, Request, header::CONTENT_TYPE},
    routing::{get, post},
};
use recoverd_config::Settings;
use recoverd_telemetry::build_sha;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Span, info};

use crate::error::ApiServerError;
use crate::http::files::list_files;
use crate::http::health::health;
use crate::http::recover::recover_and_zip;
use crate::state::ApiState;

const HEADER_REQUEST_ID: &str = "x-request-id";

/// Axum router wrapper that hosts the recoverd API.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Construct a new API server over the immutable service settings.
    #[must_use]
    pub fn new(settings: Arc<Settings>) -> Self {
        let state = Arc::new(ApiState::new(settings));

        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]);
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(recoverd_telemetry::propagate_request_id_layer())
            .layer(recoverd_telemetry::set_request_id_layer())
            .layer(trace_layer);

        let router = Router::new()
            .route("/health", get(health))
            .route("/api/files", get(list_files))
            .route("/api/recover", post(recover_and_zip))
            .layer(cors_layer)
            .route_layer(layered)
            .with_state(state);

        Self { router }
    }

    /// Consume the server and return the underlying router, for in-process
    /// testing.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server
    /// terminates unexpectedly.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), ApiServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        info!(%addr, "api server listening");
        axum::serve(listener, self.router.into_make_service())
            .await
            .map_err(|source| ApiServerError::Serve { source })?;
        Ok(())
    }
}
