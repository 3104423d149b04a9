//! Conversion between Bolt values and KGViz values.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use neo4rs::{
    BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNode, BoltNull, BoltPath,
    BoltString, BoltType, BoltUnboundedRelation,
};
use serde_json::Value;
use tracing::warn;

use kgviz_core::GraphValue;

/// Convert a JSON query parameter into a Bolt value.
///
/// Integers that fit `i64` stay integers, every other number becomes a float.
pub fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or(f64::NAN))),
        },
        Value::String(s) => BoltType::String(BoltString::new(s)),
        Value::Array(items) => {
            BoltType::List(BoltList::from(items.iter().map(json_to_bolt).collect::<Vec<_>>()))
        }
        Value::Object(fields) => {
            let mut map = BoltMap::new();
            for (key, field) in fields {
                map.put(BoltString::new(key), json_to_bolt(field));
            }
            BoltType::Map(map)
        }
    }
}

/// Convert a Bolt value from a result row into a [`GraphValue`].
///
/// Values the driver cannot decode into a chrono type are logged and become null.
pub fn bolt_to_graph(value: BoltType) -> GraphValue {
    match value {
        BoltType::Null(_) => GraphValue::Null,
        BoltType::Boolean(b) => GraphValue::Bool(b.value),
        BoltType::Integer(i) => GraphValue::Int(i.value),
        BoltType::Float(f) => GraphValue::Float(f.value),
        BoltType::String(s) => GraphValue::String(s.value),
        BoltType::Bytes(b) => GraphValue::Bytes(b.value.to_vec()),
        BoltType::List(list) => {
            GraphValue::List(list.value.into_iter().map(bolt_to_graph).collect())
        }
        BoltType::Map(map) => GraphValue::Map(map_entries(map)),
        BoltType::Node(node) => node_value(node),
        BoltType::Relation(rel) => GraphValue::Relationship {
            id: rel.id.value,
            start_id: Some(rel.start_node_id.value),
            end_id: Some(rel.end_node_id.value),
            rel_type: rel.typ.value,
            properties: map_entries(rel.properties),
        },
        BoltType::UnboundedRelation(rel) => unbounded_value(rel, None),
        BoltType::Path(path) => path_value(&path),
        BoltType::Point2D(p) => GraphValue::Point2D {
            srid: p.sr_id.value,
            x: p.x.value,
            y: p.y.value,
        },
        BoltType::Point3D(p) => GraphValue::Point3D {
            srid: p.sr_id.value,
            x: p.x.value,
            y: p.y.value,
            z: p.z.value,
        },
        BoltType::Date(d) => converted(NaiveDate::try_from(&d), GraphValue::Date),
        BoltType::Time(t) => {
            let (time, offset): (NaiveTime, FixedOffset) = t.into();
            GraphValue::Time {
                time,
                offset: Some(offset),
            }
        }
        BoltType::LocalTime(t) => GraphValue::LocalTime(t.into()),
        BoltType::DateTime(d) => {
            converted(DateTime::<FixedOffset>::try_from(&d), GraphValue::DateTime)
        }
        BoltType::DateTimeZoneId(d) => {
            converted(DateTime::<FixedOffset>::try_from(&d), GraphValue::DateTime)
        }
        BoltType::LocalDateTime(d) => {
            converted(NaiveDateTime::try_from(&d), GraphValue::LocalDateTime)
        }
        BoltType::Duration(d) => {
            let d = std::time::Duration::from(d);
            GraphValue::Duration {
                months: 0,
                days: 0,
                seconds: d.as_secs() as i64,
                nanoseconds: i64::from(d.subsec_nanos()),
            }
        }
    }
}

fn node_value(node: BoltNode) -> GraphValue {
    GraphValue::Node {
        id: node.id.value,
        labels: node
            .labels
            .value
            .into_iter()
            .filter_map(|label| match label {
                BoltType::String(s) => Some(s.value),
                _ => None,
            })
            .collect(),
        properties: map_entries(node.properties),
    }
}

fn unbounded_value(rel: BoltUnboundedRelation, ends: Option<(i64, i64)>) -> GraphValue {
    GraphValue::Relationship {
        id: rel.id.value,
        start_id: ends.map(|(start, _)| start),
        end_id: ends.map(|(_, end)| end),
        rel_type: rel.typ.value,
        properties: map_entries(rel.properties),
    }
}

/// Flatten a path into `[node, rel, node, ...]` from its start node.
///
/// `indices` holds `(relationship, node)` pairs: the relationship index is
/// 1-based and negative when the hop runs against the relationship's direction.
fn path_value(path: &BoltPath) -> GraphValue {
    let nodes = path.nodes();
    let rels = path.rels();
    let indices: Vec<i64> = path.indices().into_iter().map(|i| i.value).collect();

    let Some(start) = nodes.first() else {
        return GraphValue::Path(Vec::new());
    };

    let mut items = vec![node_value(start.clone())];
    let mut previous = start.id.value;

    for hop in indices.chunks_exact(2) {
        let (rel_index, node_index) = (hop[0], hop[1]);
        let rel = usize::try_from(rel_index.unsigned_abs())
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| rels.get(i));
        let node = usize::try_from(node_index).ok().and_then(|i| nodes.get(i));

        let (Some(rel), Some(node)) = (rel, node) else {
            warn!(rel_index, node_index, "Path index out of range, truncating path");
            break;
        };

        let next = node.id.value;
        let ends = if rel_index > 0 {
            (previous, next)
        } else {
            (next, previous)
        };
        items.push(unbounded_value(rel.clone(), Some(ends)));
        items.push(node_value(node.clone()));
        previous = next;
    }

    GraphValue::Path(items)
}

/// Map entries sorted by key, since Bolt maps carry no order.
fn map_entries(map: BoltMap) -> Vec<(String, GraphValue)> {
    let mut entries: Vec<(String, GraphValue)> = map
        .value
        .into_iter()
        .map(|(key, value)| (key.value, bolt_to_graph(value)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

fn converted<T, E: Display>(result: Result<T, E>, wrap: impl FnOnce(T) -> GraphValue) -> GraphValue {
    match result {
        Ok(value) => wrap(value),
        Err(e) => {
            warn!(error = %e, "Failed to convert temporal value, returning null");
            GraphValue::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kgviz_core::value::normalize_value;
    use neo4rs::{
        BoltDate, BoltDateTime, BoltDateTimeZoneId, BoltDuration, BoltLocalDateTime,
        BoltLocalTime, BoltPoint2D, BoltPoint3D, BoltRelation, BoltTime,
    };
    use serde_json::json;

    #[test]
    fn test_scalar_params() {
        assert_eq!(json_to_bolt(&json!(null)), BoltType::Null(BoltNull));
        assert_eq!(json_to_bolt(&json!(true)), BoltType::Boolean(BoltBoolean::new(true)));
        assert_eq!(json_to_bolt(&json!(7)), BoltType::Integer(BoltInteger::new(7)));
        assert_eq!(json_to_bolt(&json!(2.5)), BoltType::Float(BoltFloat::new(2.5)));
        assert_eq!(json_to_bolt(&json!("TP53")), BoltType::String(BoltString::new("TP53")));
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        assert!(matches!(json_to_bolt(&json!(u64::MAX)), BoltType::Float(_)));
    }

    #[test]
    fn test_nested_params() {
        let bolt = json_to_bolt(&json!({"names": ["a", "b"], "limit": 10}));
        let BoltType::Map(map) = bolt else {
            panic!("expected a map");
        };
        assert_eq!(
            map.value.get(&BoltString::new("limit")),
            Some(&BoltType::Integer(BoltInteger::new(10)))
        );
        assert_eq!(
            map.value.get(&BoltString::new("names")),
            Some(&BoltType::List(BoltList::from(vec![
                BoltType::String(BoltString::new("a")),
                BoltType::String(BoltString::new("b")),
            ])))
        );
    }

    #[test]
    fn test_bolt_scalars_to_graph() {
        assert_eq!(bolt_to_graph(BoltType::Null(BoltNull)), GraphValue::Null);
        assert_eq!(bolt_to_graph(BoltType::Integer(BoltInteger::new(3))), GraphValue::Int(3));
        assert_eq!(bolt_to_graph(BoltType::Float(BoltFloat::new(0.5))), GraphValue::Float(0.5));
        assert_eq!(
            bolt_to_graph(BoltType::String(BoltString::new("x"))),
            GraphValue::String("x".to_string())
        );
    }

    #[test]
    fn test_bolt_map_entries_are_sorted_by_key() {
        let bolt = json_to_bolt(&json!({"b": [1, "two"], "a": false}));
        assert_eq!(
            bolt_to_graph(bolt),
            GraphValue::Map(vec![
                ("a".to_string(), GraphValue::Bool(false)),
                (
                    "b".to_string(),
                    GraphValue::List(vec![GraphValue::Int(1), GraphValue::String("two".to_string())])
                ),
            ])
        );
    }

    fn node(id: i64, label: &str, name: &str) -> BoltNode {
        BoltNode::new(
            BoltInteger::new(id),
            BoltList::from(vec![BoltType::String(BoltString::new(label))]),
            [(BoltString::new("name"), BoltType::String(BoltString::new(name)))]
                .into_iter()
                .collect(),
        )
    }

    fn rel(id: i64, typ: &str) -> BoltUnboundedRelation {
        BoltUnboundedRelation::new(BoltInteger::new(id), BoltString::new(typ), BoltMap::new())
    }

    fn ints(values: &[i64]) -> BoltList {
        BoltList::from(
            values
                .iter()
                .map(|v| BoltType::Integer(BoltInteger::new(*v)))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_dates_and_local_values() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let time = NaiveTime::from_hms_opt(13, 5, 7).unwrap();

        assert_eq!(
            bolt_to_graph(BoltType::Date(BoltDate::from(date))),
            GraphValue::Date(date)
        );
        assert_eq!(
            bolt_to_graph(BoltType::LocalTime(BoltLocalTime::from(time))),
            GraphValue::LocalTime(time)
        );
        assert_eq!(
            bolt_to_graph(BoltType::LocalDateTime(BoltLocalDateTime::from(date.and_time(time)))),
            GraphValue::LocalDateTime(date.and_time(time))
        );
    }

    #[test]
    fn test_time_keeps_offset_even_when_utc() {
        let time = NaiveTime::from_hms_opt(13, 5, 7).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let value = bolt_to_graph(BoltType::Time(BoltTime::from((time, utc))));
        assert_eq!(value, GraphValue::Time { time, offset: Some(utc) });
        assert_eq!(normalize_value(&value), json!("13:05:07+00:00"));

        let value = bolt_to_graph(BoltType::Time(BoltTime::from((time, plus_two))));
        assert_eq!(normalize_value(&value), json!("13:05:07+02:00"));
    }

    #[test]
    fn test_datetimes_with_offset_and_zone() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let local = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(13, 5, 7)
            .unwrap();
        let dt = offset.from_local_datetime(&local).unwrap();

        assert_eq!(
            bolt_to_graph(BoltType::DateTime(BoltDateTime::from(dt))),
            GraphValue::DateTime(dt)
        );

        let zoned = bolt_to_graph(BoltType::DateTimeZoneId(BoltDateTimeZoneId::from((
            local,
            "Europe/Paris",
        ))));
        assert_eq!(normalize_value(&zoned), json!("2024-03-09T13:05:07+01:00"));
    }

    #[test]
    fn test_unknown_zone_becomes_null() {
        let local = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(13, 5, 7)
            .unwrap();
        let value = bolt_to_graph(BoltType::DateTimeZoneId(BoltDateTimeZoneId::from((
            local,
            "Mars/Olympus_Mons",
        ))));
        assert_eq!(value, GraphValue::Null);
    }

    #[test]
    fn test_duration_folds_into_seconds() {
        let duration = BoltDuration::new(
            BoltInteger::new(0),
            BoltInteger::new(1),
            BoltInteger::new(30),
            BoltInteger::new(500_000_000),
        );
        let value = bolt_to_graph(BoltType::Duration(duration));
        assert_eq!(
            value,
            GraphValue::Duration {
                months: 0,
                days: 0,
                seconds: 86_430,
                nanoseconds: 500_000_000,
            }
        );
        assert_eq!(normalize_value(&value), json!("P0M0DT86430.5S"));
    }

    #[test]
    fn test_points() {
        let p2 = BoltPoint2D {
            sr_id: BoltInteger::new(7203),
            x: BoltFloat::new(1.5),
            y: BoltFloat::new(2.5),
        };
        assert_eq!(
            normalize_value(&bolt_to_graph(BoltType::Point2D(p2))),
            json!({"x": 1.5, "y": 2.5, "srid": 7203})
        );

        let p3 = BoltPoint3D {
            sr_id: BoltInteger::new(9157),
            x: BoltFloat::new(1.0),
            y: BoltFloat::new(2.0),
            z: BoltFloat::new(3.0),
        };
        assert_eq!(
            bolt_to_graph(BoltType::Point3D(p3)),
            GraphValue::Point3D { srid: 9157, x: 1.0, y: 2.0, z: 3.0 }
        );
    }

    #[test]
    fn test_node_and_relation() {
        assert_eq!(
            bolt_to_graph(BoltType::Node(node(7, "Gene", "TP53"))),
            GraphValue::Node {
                id: 7,
                labels: vec!["Gene".to_string()],
                properties: vec![("name".to_string(), "TP53".into())],
            }
        );

        let relation = BoltRelation {
            id: BoltInteger::new(3),
            start_node_id: BoltInteger::new(7),
            end_node_id: BoltInteger::new(8),
            typ: BoltString::new("CAUSES"),
            properties: [(BoltString::new("weight"), BoltType::Float(BoltFloat::new(0.9)))]
                .into_iter()
                .collect(),
        };
        assert_eq!(
            bolt_to_graph(BoltType::Relation(relation)),
            GraphValue::Relationship {
                id: 3,
                start_id: Some(7),
                end_id: Some(8),
                rel_type: "CAUSES".to_string(),
                properties: vec![("weight".to_string(), GraphValue::Float(0.9))],
            }
        );
    }

    #[test]
    fn test_unbounded_relation_has_no_endpoints() {
        assert_eq!(
            bolt_to_graph(BoltType::UnboundedRelation(rel(4, "BINDS"))),
            GraphValue::Relationship {
                id: 4,
                start_id: None,
                end_id: None,
                rel_type: "BINDS".to_string(),
                properties: Vec::new(),
            }
        );
    }

    #[test]
    fn test_single_node_path() {
        let path = BoltPath {
            nodes: BoltList::from(vec![BoltType::Node(node(1, "Gene", "TP53"))]),
            rels: BoltList::new(),
            indices: BoltList::new(),
        };
        let value = bolt_to_graph(BoltType::Path(path));
        assert_eq!(normalize_value(&value), json!([{"name": "TP53"}]));
    }

    #[test]
    fn test_path_follows_indices_and_direction() {
        // (g:1)-[:CAUSES]->(d:2)<-[:TREATS]-(m:3)
        let path = BoltPath {
            nodes: BoltList::from(vec![
                BoltType::Node(node(1, "Gene", "TP53")),
                BoltType::Node(node(2, "Disease", "Li-Fraumeni")),
                BoltType::Node(node(3, "Drug", "APR-246")),
            ]),
            rels: BoltList::from(vec![
                BoltType::UnboundedRelation(rel(10, "CAUSES")),
                BoltType::UnboundedRelation(rel(11, "TREATS")),
            ]),
            indices: ints(&[1, 1, -2, 2]),
        };

        let GraphValue::Path(items) = bolt_to_graph(BoltType::Path(path)) else {
            panic!("expected a path");
        };
        assert_eq!(items.len(), 5);
        assert!(matches!(
            &items[1],
            GraphValue::Relationship { rel_type, start_id: Some(1), end_id: Some(2), .. }
                if rel_type == "CAUSES"
        ));
        assert!(matches!(
            &items[3],
            GraphValue::Relationship { rel_type, start_id: Some(3), end_id: Some(2), .. }
                if rel_type == "TREATS"
        ));
        assert_eq!(
            normalize_value(&GraphValue::Path(items)),
            json!([{"name": "TP53"}, {}, {"name": "Li-Fraumeni"}, {}, {"name": "APR-246"}])
        );
    }

    #[test]
    fn test_path_with_bad_index_is_truncated() {
        let path = BoltPath {
            nodes: BoltList::from(vec![
                BoltType::Node(node(1, "Gene", "TP53")),
                BoltType::Node(node(2, "Disease", "Li-Fraumeni")),
            ]),
            rels: BoltList::from(vec![BoltType::UnboundedRelation(rel(10, "CAUSES"))]),
            indices: ints(&[1, 1, 5, 0]),
        };
        let GraphValue::Path(items) = bolt_to_graph(BoltType::Path(path)) else {
            panic!("expected a path");
        };
        assert_eq!(items.len(), 3);
    }
}
