//! Transformer configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_NODE_TAG: &str = "start";
pub const DEFAULT_TARGET_NODE_TAG: &str = "end";
pub const DEFAULT_RELATIONSHIP_TYPE_TAG: &str = "type";

/// Record properties never copied onto an edge, whatever the configured tags are.
pub const EXCLUDED_PROPERTIES: &[&str] = &["source", "target", "start", "end"];

/// Which keys of a relationship record hold the source node, the target node
/// and the relationship kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    #[serde(alias = "sourceTag")]
    pub source_node_tag: String,
    #[serde(alias = "targetTag")]
    pub target_node_tag: String,
    #[serde(alias = "typeTag")]
    pub relationship_type_tag: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            source_node_tag: DEFAULT_SOURCE_NODE_TAG.to_string(),
            target_node_tag: DEFAULT_TARGET_NODE_TAG.to_string(),
            relationship_type_tag: DEFAULT_RELATIONSHIP_TYPE_TAG.to_string(),
        }
    }
}

impl TransformConfig {
    /// Whether a record property stays off the edge.
    pub fn is_excluded(&self, key: &str) -> bool {
        key == self.source_node_tag
            || key == self.target_node_tag
            || EXCLUDED_PROPERTIES.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = TransformConfig::default();
        assert_eq!(config.source_node_tag, "start");
        assert_eq!(config.target_node_tag, "end");
        assert_eq!(config.relationship_type_tag, "type");
    }

    #[test]
    fn test_partial_parameters_keep_defaults() {
        let config: TransformConfig =
            serde_json::from_value(json!({"source_node_tag": "from"})).unwrap();
        assert_eq!(config.source_node_tag, "from");
        assert_eq!(config.target_node_tag, "end");
        assert_eq!(config.relationship_type_tag, "type");
    }

    #[test]
    fn test_camel_case_aliases_and_unknown_keys() {
        let config: TransformConfig = serde_json::from_value(json!({
            "sourceTag": "a",
            "targetTag": "b",
            "typeTag": "kind",
            "unrelated": true
        }))
        .unwrap();
        assert_eq!(config.source_node_tag, "a");
        assert_eq!(config.target_node_tag, "b");
        assert_eq!(config.relationship_type_tag, "kind");
    }

    #[test]
    fn test_exclusions_follow_configured_tags() {
        let config = TransformConfig {
            source_node_tag: "from".to_string(),
            target_node_tag: "to".to_string(),
            relationship_type_tag: "kind".to_string(),
        };
        assert!(config.is_excluded("from"));
        assert!(config.is_excluded("to"));
        assert!(config.is_excluded("start"));
        assert!(config.is_excluded("target"));
        assert!(!config.is_excluded("kind"));
        assert!(!config.is_excluded("weight"));
    }
}
