//! KGViz Core Library
//!
//! Query execution envelopes, graph value normalization and the
//! PxLSViz graph transformer.

pub mod context;
pub mod error;
pub mod query;
pub mod transform;
pub mod value;

pub use context::RequestContext;
pub use error::{VizError, VizResult};
pub use query::{Envelope, ErrorPolicy, QueryExecutor, QueryRunner};
pub use transform::{transform_to_pxlsviz, GraphTransformer, TransformConfig, TransformStats, VizGraph};
pub use value::{GraphValue, Record};
