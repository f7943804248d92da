//! API application state.

use std::sync::Arc;

use recoverd_config::Settings;
use recoverd_jobs::JobRunner;

/// Shared dependencies wired through every request handler.
pub(crate) struct ApiState {
    pub(crate) settings: Arc<Settings>,
    pub(crate) runner: JobRunner,
}

impl ApiState {
    pub(crate) fn new(settings: Arc<Settings>) -> Self {
        let runner = JobRunner::new(Arc::clone(&settings));
        Self { settings, runner }
    }
}
