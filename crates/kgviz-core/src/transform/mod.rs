//! PxLSViz transform: query output → visualization graph.

pub mod config;
pub mod model;
pub mod transformer;

use serde_json::Value;
use tracing::info;

use crate::context::RequestContext;

pub use config::TransformConfig;
pub use model::{TransformStats, VizGraph};
pub use transformer::{relationship_id, GraphTransformer};

/// Transform externally supplied query-result JSON for one request.
pub fn transform_to_pxlsviz(
    ctx: &RequestContext,
    input: &Value,
    config: TransformConfig,
) -> (VizGraph, TransformStats) {
    let span = tracing::info_span!("transform", request_id = %ctx.request_id);
    let _guard = span.enter();

    let (graph, stats) = GraphTransformer::new(config).transform_with_stats(input);
    info!(
        request_id = %ctx.request_id,
        nodes = graph.nodes.len(),
        relationships = graph.relationships.len(),
        skipped = stats.skipped,
        "Transformation executed successfully"
    );

    (graph, stats)
}
