//! Query execution against the graph database collaborator.

pub mod envelope;
pub mod executor;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::VizResult;
use crate::value::Record;

pub use envelope::{Envelope, EnvelopeMetadata, EnvelopeStatus};
pub use executor::{ErrorPolicy, QueryExecutor};

/// Anything that can run a Cypher query and hand back result rows.
///
/// Timeouts and retries belong to the implementation's connection layer.
#[async_trait]
pub trait QueryRunner: Send + Sync {
    async fn run_query(&self, query: &str, params: &Map<String, Value>) -> VizResult<Vec<Record>>;
}
