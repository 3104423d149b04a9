//! Query executor: run, normalize, wrap.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info};

use super::envelope::{Envelope, EnvelopeMetadata};
use super::QueryRunner;
use crate::context::RequestContext;
use crate::error::VizResult;
use crate::value::normalize_records;

/// What happens when the collaborator fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the failure and return it inside an error envelope.
    #[default]
    EnvelopeOnError,
    /// Log the failure and return it to the caller as `Err`.
    PropagateOnError,
}

/// Forwards queries to a [`QueryRunner`] and wraps the outcome in an [`Envelope`].
#[derive(Clone)]
pub struct QueryExecutor {
    runner: Arc<dyn QueryRunner>,
    policy: ErrorPolicy,
}

impl QueryExecutor {
    pub fn new(runner: Arc<dyn QueryRunner>, policy: ErrorPolicy) -> Self {
        Self { runner, policy }
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Execute a Cypher query.
    ///
    /// Under [`ErrorPolicy::EnvelopeOnError`] this never returns `Err`.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        query: &str,
        params: Map<String, Value>,
    ) -> VizResult<Envelope> {
        info!(request_id = %ctx.request_id, query, parameters = ?params, "Executing query");

        let outcome = self.runner.run_query(query, &params).await;
        let metadata = EnvelopeMetadata {
            request_id: ctx.request_id.clone(),
            query: query.to_string(),
            parameters: params,
        };

        match outcome {
            Ok(records) => {
                let results = normalize_records(&records);
                info!(
                    request_id = %ctx.request_id,
                    result_count = results.len(),
                    "Query executed successfully"
                );
                Ok(Envelope::success(results, metadata))
            }
            Err(e) => {
                error!(request_id = %ctx.request_id, error = %e, "Error executing query");
                match self.policy {
                    ErrorPolicy::EnvelopeOnError => Ok(Envelope::error(
                        format!("Error executing query: {}", e),
                        metadata,
                    )),
                    ErrorPolicy::PropagateOnError => Err(e),
                }
            }
        }
    }
}
