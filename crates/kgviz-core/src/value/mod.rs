//! Graph-native values returned by the query collaborator.

pub mod normalize;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

pub use normalize::{normalize_record, normalize_records, normalize_value};

/// A value as it comes back from the graph database, before it is made JSON-safe.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<GraphValue>),
    /// Map entries in the order the database produced them.
    Map(Vec<(String, GraphValue)>),
    Node {
        id: i64,
        labels: Vec<String>,
        properties: Vec<(String, GraphValue)>,
    },
    /// Endpoint ids are unknown for relationships that arrive inside a path
    /// without their direction resolved.
    Relationship {
        id: i64,
        start_id: Option<i64>,
        end_id: Option<i64>,
        rel_type: String,
        properties: Vec<(String, GraphValue)>,
    },
    /// Nodes and relationships of a path, alternating from the start node.
    Path(Vec<GraphValue>),
    Date(NaiveDate),
    Time {
        time: NaiveTime,
        offset: Option<FixedOffset>,
    },
    LocalTime(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
    Duration {
        months: i64,
        days: i64,
        seconds: i64,
        nanoseconds: i64,
    },
    Point2D {
        srid: i64,
        x: f64,
        y: f64,
    },
    Point3D {
        srid: i64,
        x: f64,
        y: f64,
        z: f64,
    },
}

impl From<&str> for GraphValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for GraphValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for GraphValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for GraphValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for GraphValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One result row: column names mapped to values, in `RETURN` order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, GraphValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Later columns with the same name shadow earlier ones
    /// once the record is normalized.
    pub fn push(&mut self, key: impl Into<String>, value: GraphValue) {
        self.fields.push((key.into(), value));
    }

    pub fn with(mut self, key: impl Into<String>, value: GraphValue) -> Self {
        self.push(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&GraphValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GraphValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, GraphValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, GraphValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
