//! # KGViz Graph
//!
//! Neo4j collaborator for KGViz.
//!
//! Provides the connection client, a retry policy for connection setup,
//! and conversion between Bolt values and KGViz values.

pub mod client;
pub mod convert;
pub mod retry;

pub use client::{GraphClient, GraphConfig};
pub use retry::RetryPolicy;
