//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use kgviz_graph::{GraphClient, GraphConfig, RetryPolicy};

pub mod query;
pub mod serve;
pub mod transform;

/// KGViz - Cypher read API and PxLSViz graph transformer
#[derive(Parser)]
#[command(name = "kgviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Console log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty, env = "KGVIZ_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Also write JSON logs to a daily-rotated file in this directory
    #[arg(long, global = true, env = "KGVIZ_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(serve::ServeArgs),

    /// Run a single Cypher query and print the result envelope
    Query(query::QueryArgs),

    /// Transform query-result JSON into a PxLSViz graph
    Transform(transform::TransformArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Query(args) => query::execute(args).await,
            Commands::Transform(args) => transform::execute(args),
        }
    }
}

/// Neo4j connection settings shared by the commands that talk to the database.
#[derive(Args, Debug, Clone)]
pub struct Neo4jArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, env = "NEO4J_URI", default_value = "")]
    pub neo4j_uri: String,

    /// Neo4j user
    #[arg(long, env = "NEO4J_USER", default_value = "")]
    pub neo4j_user: String,

    /// Neo4j password
    #[arg(long, env = "NEO4J_PASSWORD", default_value = "", hide_env_values = true)]
    pub neo4j_password: String,

    /// Database name
    #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub neo4j_database: String,

    /// Connection attempts before giving up
    #[arg(long, default_value_t = 5)]
    pub connect_attempts: u32,

    /// Delay before the first reconnect, doubled on each retry
    #[arg(long, default_value_t = 500)]
    pub connect_delay_ms: u64,
}

impl Neo4jArgs {
    pub fn config(&self) -> GraphConfig {
        GraphConfig::new(&self.neo4j_uri, &self.neo4j_user, &self.neo4j_password)
            .with_database(&self.neo4j_database)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.connect_attempts,
            base_delay: Duration::from_millis(self.connect_delay_ms),
            ..RetryPolicy::default()
        }
    }

    pub async fn connect(&self) -> Result<GraphClient> {
        let client = GraphClient::connect_with_retry(&self.config(), &self.retry_policy()).await?;
        Ok(client)
    }
}
