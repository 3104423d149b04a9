//! Output model of the PxLSViz transform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node/edge graph ready for the visualization front end.
///
/// Nodes are the first-seen JSON objects for each id; relationships are the
/// derived edges. Both lists keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VizGraph {
    pub nodes: Vec<Map<String, Value>>,
    pub relationships: Vec<Map<String, Value>>,
}

impl VizGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }
}

/// Counters of one transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    /// Relationship objects examined (values that were JSON objects).
    pub relationships_seen: usize,
    /// Items or relationship values rejected by validation.
    pub skipped: usize,
    /// Valid relationships dropped because their edge id was already emitted.
    pub duplicates: usize,
}
