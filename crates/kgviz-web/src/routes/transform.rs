//! Transformation route handlers.

use axum::Json;
use kgviz_core::transform::transform_to_pxlsviz;
use kgviz_core::{TransformConfig, VizGraph};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::context::Ctx;

#[derive(Debug, Deserialize)]
pub struct PxlsVizTransformRequest {
    /// Query output to transform; anything other than a list yields an empty graph.
    pub input_json: Value,
    #[serde(default)]
    pub parameters: TransformConfig,
}

/// `POST /api/v1/transform/pxlsviz`
pub async fn pxlsviz(Ctx(ctx): Ctx, Json(req): Json<PxlsVizTransformRequest>) -> Json<VizGraph> {
    debug!(
        request_id = %ctx.request_id,
        parameters = ?req.parameters,
        "Received transformation request"
    );

    let (graph, _stats) = transform_to_pxlsviz(&ctx, &req.input_json, req.parameters);
    Json(graph)
}
