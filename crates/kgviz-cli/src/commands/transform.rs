//! Offline PxLSViz transform command.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

use kgviz_core::{transform_to_pxlsviz, RequestContext, TransformConfig};

use crate::output;

#[derive(Args)]
pub struct TransformArgs {
    /// JSON file with query results (reads stdin when omitted or "-")
    pub file: Option<PathBuf>,

    /// Key of the source node inside each relationship object
    #[arg(long)]
    pub source_tag: Option<String>,

    /// Key of the target node inside each relationship object
    #[arg(long)]
    pub target_tag: Option<String>,

    /// Key of the relationship type inside each relationship object
    #[arg(long)]
    pub type_tag: Option<String>,

    /// Write the graph to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print transform counters to stderr
    #[arg(long)]
    pub stats: bool,
}

impl TransformArgs {
    fn config(&self) -> TransformConfig {
        let mut config = TransformConfig::default();
        if let Some(tag) = &self.source_tag {
            config.source_node_tag = tag.clone();
        }
        if let Some(tag) = &self.target_tag {
            config.target_node_tag = tag.clone();
        }
        if let Some(tag) = &self.type_tag {
            config.relationship_type_tag = tag.clone();
        }
        config
    }
}

pub fn execute(args: TransformArgs) -> Result<()> {
    let raw = read_input(args.file.as_ref())?;
    let input: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;

    let ctx = RequestContext::new();
    let (graph, stats) = transform_to_pxlsviz(&ctx, &input, args.config());

    let rendered = serde_json::to_string_pretty(&graph)?;
    match &args.output {
        Some(path) => std::fs::write(path, rendered + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", rendered),
    }

    if args.stats {
        output::print_transform_stats(&graph, &stats);
    }
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
