//! Cypher query route handlers.

use axum::{extract::State, Json};
use kgviz_core::Envelope;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::context::Ctx;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// `POST /api/v1/read`: failures are reported inside the envelope.
pub async fn read(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Envelope>, ApiError> {
    info!(request_id = %ctx.request_id, "Received read request");

    let envelope = state
        .read_executor
        .execute(&ctx, &req.query, req.parameters)
        .await?;

    Ok(Json(envelope))
}

/// `POST /api/v1/query`: failures become HTTP 500.
pub async fn legacy_query(
    State(state): State<AppState>,
    Ctx(ctx): Ctx,
    Json(req): Json<QueryRequest>,
) -> Result<Json<Envelope>, ApiError> {
    info!(request_id = %ctx.request_id, query = %req.query, "Received query request");

    let envelope = state
        .legacy_executor
        .execute(&ctx, &req.query, req.parameters)
        .await
        .map_err(|e| ApiError::internal(format!("Error processing request: {}", e)))?;

    Ok(Json(envelope))
}
