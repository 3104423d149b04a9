//! Request context extraction.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use kgviz_core::RequestContext;
use tower_http::request_id::RequestId;

/// Extracts the [`RequestContext`] for the `X-Request-ID` assigned by the
/// request-id layer.
pub struct Ctx(pub RequestContext);

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .map(RequestContext::with_id)
            .unwrap_or_default();
        Ok(Self(ctx))
    }
}
