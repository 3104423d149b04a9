//! Neo4j connection client.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{BoltType, ConfigBuilder, Graph, Query, Row};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use kgviz_core::{QueryRunner, Record, VizError, VizResult};

use crate::convert::{bolt_to_graph, json_to_bolt};
use crate::retry::RetryPolicy;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> usize {
    16
}

fn default_fetch_size() -> usize {
    200
}

impl GraphConfig {
    pub fn new(uri: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
            database: default_database(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Reject configurations with missing connection settings.
    pub fn validate(&self) -> VizResult<()> {
        let missing: Vec<&str> = [
            ("uri", &self.uri),
            ("user", &self.user),
            ("password", &self.password),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(VizError::config(format!(
                "Missing required Neo4j connection settings: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Client for Neo4j query operations.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// `Graph::connect` only builds the pool; a `RETURN 1` ping forces a real
    /// bolt handshake so an unreachable server fails here.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        config.validate()?;

        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .context("Neo4j is not responding to queries")?;

        info!(uri = %config.uri, database = %config.database, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Connect, retrying with backoff according to `policy`.
    pub async fn connect_with_retry(config: &GraphConfig, policy: &RetryPolicy) -> VizResult<Self> {
        config.validate()?;
        policy
            .run("neo4j connect", || Self::connect(config))
            .await
            .map_err(|e| VizError::connection(format!("{:#}", e)))
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> Result<Vec<Row>> {
        let mut result = self.graph.execute(query).await.context("Neo4j query failed")?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.context("Failed to fetch result row")? {
            rows.push(row);
        }
        Ok(rows)
    }
}

#[async_trait]
impl QueryRunner for GraphClient {
    async fn run_query(&self, query: &str, params: &Map<String, Value>) -> VizResult<Vec<Record>> {
        let mut cypher = Query::new(query.to_string());
        for (key, value) in params {
            cypher = cypher.param(key, json_to_bolt(value));
        }

        let rows = self
            .query(cypher)
            .await
            .map_err(|e| VizError::query(format!("{:#}", e)))?;
        debug!(rows = rows.len(), "Fetched rows");

        rows.iter().map(row_to_record).collect()
    }
}

/// Bolt rows carry no public column order, so columns come back sorted by name.
fn row_to_record(row: &Row) -> VizResult<Record> {
    let columns: BTreeMap<String, BoltType> = row
        .to()
        .map_err(|e| VizError::query(format!("Failed to decode result row: {}", e)))?;

    Ok(columns
        .into_iter()
        .map(|(name, value)| (name, bolt_to_graph(value)))
        .collect())
}
