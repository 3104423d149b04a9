//! Conversion of graph-native values into JSON-safe primitives.
//!
//! Temporal values become ISO-8601 strings, points become `{x, y[, z], srid}`
//! objects, nodes and relationships collapse to their property maps.
//!
//! Strings that start with `{` or `[` are parsed as JSON and replaced by the
//! parsed structure when that succeeds; otherwise the string is kept as-is.
//! A plain text property that happens to look like JSON therefore changes
//! shape in the output.

use serde_json::{Map, Number, Value};

use super::{GraphValue, Record};

/// Normalize a list of records into JSON objects.
pub fn normalize_records(records: &[Record]) -> Vec<Value> {
    records
        .iter()
        .map(|record| Value::Object(normalize_record(record)))
        .collect()
}

/// Normalize a single record into a JSON object, keeping column order.
pub fn normalize_record(record: &Record) -> Map<String, Value> {
    let mut object = Map::new();
    for (key, value) in record.iter() {
        object.insert(key.to_string(), normalize_value(value));
    }
    object
}

/// Normalize one value, recursing through lists, maps and graph entities.
pub fn normalize_value(value: &GraphValue) -> Value {
    match value {
        GraphValue::Null => Value::Null,
        GraphValue::Bool(b) => Value::Bool(*b),
        GraphValue::Int(i) => Value::Number((*i).into()),
        GraphValue::Float(f) => float_value(*f),
        GraphValue::String(s) => string_value(s),
        GraphValue::Bytes(bytes) => {
            Value::Array(bytes.iter().map(|b| Value::Number((*b).into())).collect())
        }
        GraphValue::List(items) | GraphValue::Path(items) => {
            Value::Array(items.iter().map(normalize_value).collect())
        }
        GraphValue::Map(entries) => Value::Object(normalize_entries(entries)),
        GraphValue::Node { properties, .. } => Value::Object(normalize_entries(properties)),
        GraphValue::Relationship { properties, .. } => {
            Value::Object(normalize_entries(properties))
        }
        GraphValue::Date(date) => Value::String(date.format("%Y-%m-%d").to_string()),
        GraphValue::Time { time, offset } => {
            let mut text = time.format("%H:%M:%S%.f").to_string();
            if let Some(offset) = offset {
                text.push_str(&offset.to_string());
            }
            Value::String(text)
        }
        GraphValue::LocalTime(time) => Value::String(time.format("%H:%M:%S%.f").to_string()),
        GraphValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
        GraphValue::LocalDateTime(dt) => {
            Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        }
        GraphValue::Duration {
            months,
            days,
            seconds,
            nanoseconds,
        } => Value::String(iso_duration(*months, *days, *seconds, *nanoseconds)),
        GraphValue::Point2D { srid, x, y } => {
            let mut point = Map::new();
            point.insert("x".to_string(), float_value(*x));
            point.insert("y".to_string(), float_value(*y));
            point.insert("srid".to_string(), Value::Number((*srid).into()));
            Value::Object(point)
        }
        GraphValue::Point3D { srid, x, y, z } => {
            let mut point = Map::new();
            point.insert("x".to_string(), float_value(*x));
            point.insert("y".to_string(), float_value(*y));
            point.insert("z".to_string(), float_value(*z));
            point.insert("srid".to_string(), Value::Number((*srid).into()));
            Value::Object(point)
        }
    }
}

fn normalize_entries(entries: &[(String, GraphValue)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(k, v)| (k.clone(), normalize_value(v)))
        .collect()
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

fn string_value(s: &str) -> Value {
    if s.starts_with('{') || s.starts_with('[') {
        if let Ok(parsed) = serde_json::from_str::<Value>(s) {
            return parsed;
        }
    }
    Value::String(s.to_string())
}

/// Render a duration as `P{months}M{days}DT{seconds}S`.
fn iso_duration(months: i64, days: i64, seconds: i64, nanoseconds: i64) -> String {
    let total_nanos = i128::from(seconds) * 1_000_000_000 + i128::from(nanoseconds);
    let sign = if total_nanos < 0 { "-" } else { "" };
    let abs = total_nanos.unsigned_abs();
    let whole = abs / 1_000_000_000;
    let frac = abs % 1_000_000_000;

    let secs = if frac == 0 {
        format!("{sign}{whole}")
    } else {
        let digits = format!("{frac:09}");
        format!("{sign}{whole}.{}", digits.trim_end_matches('0'))
    };

    format!("P{months}M{days}DT{secs}S")
}
