//! Uniform success/error wrapper around query results.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Echo of what was asked, attached to every envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeMetadata {
    pub request_id: String,
    pub query: String,
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: EnvelopeMetadata,
}

impl Envelope {
    pub fn success(results: Vec<Value>, metadata: EnvelopeMetadata) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            count: Some(results.len()),
            results: Some(results),
            error: None,
            metadata,
        }
    }

    pub fn error(message: impl Into<String>, metadata: EnvelopeMetadata) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            count: None,
            results: None,
            error: Some(message.into()),
            metadata,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}
