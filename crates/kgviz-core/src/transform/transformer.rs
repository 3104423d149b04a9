//! Relationship records → deduplicated node/edge graph.
//!
//! Input is a list of JSON objects whose *values* are relationship records
//! (the outer keys such as `"rel"` or `"r1"` carry no meaning). Each record
//! holds a source node object, a target node object and a relationship kind
//! under the configured tags, plus any extra properties.
//!
//! Malformed items never abort the batch: they are logged, counted and skipped.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use super::config::TransformConfig;
use super::model::{TransformStats, VizGraph};

/// Edge id derived from its endpoints and kind.
///
/// Not collision-free when a component itself contains `_`.
pub fn relationship_id(source_id: &str, rel_type: &str, target_id: &str) -> String {
    format!("{}_{}_{}", source_id, rel_type, target_id)
}

/// Turns relationship records into a [`VizGraph`].
///
/// Holds configuration only; every call to [`transform`](Self::transform)
/// works on its own run state, so a transformer can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct GraphTransformer {
    config: TransformConfig,
}

impl GraphTransformer {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transform input data into `{nodes, relationships}`.
    ///
    /// A top-level value that is not a list yields an empty graph.
    pub fn transform(&self, input: &Value) -> VizGraph {
        self.transform_with_stats(input).0
    }

    /// Same as [`transform`](Self::transform), also returning the run counters.
    pub fn transform_with_stats(&self, input: &Value) -> (VizGraph, TransformStats) {
        let mut run = TransformRun::new(&self.config);
        debug!("Transform run state initialized");

        let Some(items) = input.as_array() else {
            error!(
                input_type = json_type(input),
                "Invalid input: data must be a list, returning empty graph"
            );
            return run.finish();
        };

        for item in items {
            run.process_item(item);
        }

        run.finish()
    }
}

/// Endpoints of a relationship that passed node validation.
struct Endpoints<'a> {
    source: &'a Map<String, Value>,
    source_id: &'a Value,
    source_key: String,
    target: &'a Map<String, Value>,
    target_id: &'a Value,
    target_key: String,
}

/// State owned by a single transform call.
struct TransformRun<'a> {
    config: &'a TransformConfig,
    nodes: Vec<Map<String, Value>>,
    node_ids: HashSet<String>,
    relationships: Vec<Map<String, Value>>,
    edge_ids: HashSet<String>,
    stats: TransformStats,
}

impl<'a> TransformRun<'a> {
    fn new(config: &'a TransformConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            node_ids: HashSet::new(),
            relationships: Vec::new(),
            edge_ids: HashSet::new(),
            stats: TransformStats::default(),
        }
    }

    fn process_item(&mut self, item: &Value) {
        let Some(entries) = item.as_object() else {
            warn!(item_type = json_type(item), "Skipping non-object item in outer list");
            self.stats.skipped += 1;
            return;
        };

        for (key, value) in entries {
            match value.as_object() {
                Some(record) => self.process_relationship(key, record),
                None => {
                    warn!(key = %key, "Skipping non-object value, expected relationship object");
                    self.stats.skipped += 1;
                }
            }
        }
    }

    fn process_relationship(&mut self, key: &str, record: &Map<String, Value>) {
        self.stats.relationships_seen += 1;

        let Some(endpoints) = self.endpoints(record) else {
            let declared = record
                .get(&self.config.relationship_type_tag)
                .and_then(Value::as_str)
                .unwrap_or("N/A");
            warn!(
                rel_type = declared,
                key = %key,
                "Skipping relationship due to missing/invalid node data or id"
            );
            self.stats.skipped += 1;
            return;
        };

        // Nodes go in before the kind is checked; a bad kind still leaves them.
        self.register_node(&endpoints.source_key, endpoints.source);
        self.register_node(&endpoints.target_key, endpoints.target);

        let Some((edge_id, edge)) = self.build_edge(record, &endpoints) else {
            warn!(key = %key, "Relationship missing valid type, skipping");
            self.stats.skipped += 1;
            return;
        };

        if self.edge_ids.insert(edge_id.clone()) {
            debug!(edge_id = %edge_id, "Added new relationship");
            self.relationships.push(edge);
        } else {
            info!(edge_id = %edge_id, "Skipping duplicate relationship id");
            self.stats.duplicates += 1;
        }
    }

    fn endpoints<'r>(&self, record: &'r Map<String, Value>) -> Option<Endpoints<'r>> {
        let source = extract_node(record, &self.config.source_node_tag)?;
        let target = extract_node(record, &self.config.target_node_tag)?;
        let source_id = source.get("id")?;
        let target_id = target.get("id")?;

        Some(Endpoints {
            source,
            source_id,
            source_key: node_key(source_id)?,
            target,
            target_id,
            target_key: node_key(target_id)?,
        })
    }

    fn register_node(&mut self, key: &str, node: &Map<String, Value>) {
        if self.node_ids.insert(key.to_string()) {
            debug!(node_id = %key, "Added new node");
            self.nodes.push(node.clone());
        }
    }

    /// Build the edge id and object, or `None` when the kind is missing or empty.
    fn build_edge(
        &self,
        record: &Map<String, Value>,
        endpoints: &Endpoints<'_>,
    ) -> Option<(String, Map<String, Value>)> {
        let kind = record
            .get(&self.config.relationship_type_tag)
            .and_then(Value::as_str)
            .filter(|kind| !kind.is_empty())?;
        let edge_id = relationship_id(&endpoints.source_key, kind, &endpoints.target_key);

        let mut edge = Map::new();
        edge.insert("id".to_string(), Value::String(edge_id.clone()));
        edge.insert("source".to_string(), endpoints.source_id.clone());
        edge.insert("target".to_string(), endpoints.target_id.clone());
        edge.insert("type".to_string(), Value::String(kind.to_string()));

        for (key, value) in record {
            if self.config.is_excluded(key) || edge.contains_key(key) {
                continue;
            }
            edge.insert(key.clone(), value.clone());
        }

        Some((edge_id, edge))
    }

    fn finish(self) -> (VizGraph, TransformStats) {
        info!(
            relationships_seen = self.stats.relationships_seen,
            nodes = self.nodes.len(),
            relationships = self.relationships.len(),
            duplicates = self.stats.duplicates,
            "Transform complete"
        );
        if self.stats.skipped > 0 {
            warn!(
                skipped = self.stats.skipped,
                "Skipped relationship objects due to validation errors or missing data"
            );
        }

        let graph = VizGraph {
            nodes: self.nodes,
            relationships: self.relationships,
        };
        (graph, self.stats)
    }
}

/// A node object with a non-null `id`, or `None`.
fn extract_node<'r>(record: &'r Map<String, Value>, tag: &str) -> Option<&'r Map<String, Value>> {
    let node = record.get(tag)?.as_object()?;
    match node.get("id") {
        Some(id) if !id.is_null() => Some(node),
        _ => {
            debug!(tag, "Invalid or incomplete node data encountered");
            None
        }
    }
}

/// String form of a node id used for dedup and edge ids; `None` for falsy ids.
fn node_key(id: &Value) -> Option<String> {
    match id {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
