//! Request-scoped context passed explicitly through service calls.

use serde::Serialize;
use uuid::Uuid;

/// Identifies the request a unit of work belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    /// Create a context with a fresh UUID v4 request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a context for an id handed over by the caller (e.g. an HTTP header).
    pub fn with_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
