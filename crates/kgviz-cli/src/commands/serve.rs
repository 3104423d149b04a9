//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::sync::Arc;

use kgviz_web::AppState;

use super::Neo4jArgs;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "KGVIZ_PORT", default_value = "5001")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "KGVIZ_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[command(flatten)]
    pub neo4j: Neo4jArgs,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let client = args.neo4j.connect().await?;
    let state = AppState::new(Arc::new(client));

    println!();
    println!("  {} {}", "KGViz".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}      http://{}:{}/health", "Health".green(), args.host, args.port);
    println!("  {}        http://{}:{}/api/v1/read", "Read".green(), args.host, args.port);
    println!(
        "  {}   http://{}:{}/api/v1/transform/pxlsviz",
        "Transform".green(),
        args.host,
        args.port
    );
    println!("  {}       {}", "Neo4j".green(), args.neo4j.neo4j_uri.dimmed());
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    kgviz_web::run_server(state, &args.host, args.port).await?;

    Ok(())
}
