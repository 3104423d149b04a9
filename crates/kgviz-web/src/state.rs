//! Application state.

use std::sync::Arc;

use kgviz_core::{ErrorPolicy, QueryExecutor, QueryRunner};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Executor behind `/api/v1/read`: failures come back as error envelopes.
    pub read_executor: QueryExecutor,
    /// Executor behind the legacy `/api/v1/query`: failures become HTTP errors.
    pub legacy_executor: QueryExecutor,
}

impl AppState {
    pub fn new(runner: Arc<dyn QueryRunner>) -> Self {
        Self {
            read_executor: QueryExecutor::new(runner.clone(), ErrorPolicy::EnvelopeOnError),
            legacy_executor: QueryExecutor::new(runner, ErrorPolicy::PropagateOnError),
        }
    }
}
