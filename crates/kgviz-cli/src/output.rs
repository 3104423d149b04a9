//! Terminal output formatting.

use colored::Colorize;
use kgviz_core::{TransformStats, VizGraph};

/// Print transform counters to stderr, keeping stdout for the graph itself.
pub fn print_transform_stats(graph: &VizGraph, stats: &TransformStats) {
    eprintln!();
    eprintln!("{}", "Transform Summary".bold());
    eprintln!("  {:<16} {}", "Nodes", graph.nodes.len().to_string().green());
    eprintln!(
        "  {:<16} {}",
        "Relationships",
        graph.relationships.len().to_string().green()
    );
    eprintln!("  {:<16} {}", "Seen", stats.relationships_seen);
    eprintln!("  {:<16} {}", "Skipped", colored_count(stats.skipped));
    eprintln!("  {:<16} {}", "Duplicates", colored_count(stats.duplicates));
}

fn colored_count(n: usize) -> colored::ColoredString {
    if n == 0 {
        n.to_string().dimmed()
    } else {
        n.to_string().yellow()
    }
}
