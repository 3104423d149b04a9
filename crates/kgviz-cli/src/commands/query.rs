//! One-off query command.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{Map, Value};
use std::sync::Arc;

use kgviz_core::{ErrorPolicy, QueryExecutor, RequestContext};

use super::Neo4jArgs;

#[derive(Args)]
pub struct QueryArgs {
    /// Cypher query to run
    pub cypher: String,

    /// Query parameters as a JSON object
    #[arg(long, default_value = "{}")]
    pub params: String,

    #[command(flatten)]
    pub neo4j: Neo4jArgs,
}

pub async fn execute(args: QueryArgs) -> Result<()> {
    let params = parse_params(&args.params)?;
    let client = args.neo4j.connect().await?;

    let executor = QueryExecutor::new(Arc::new(client), ErrorPolicy::PropagateOnError);
    let ctx = RequestContext::new();
    let envelope = executor.execute(&ctx, &args.cypher, params).await?;

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

pub(crate) fn parse_params(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).context("--params is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("--params must be a JSON object, got {}", other),
    }
}
