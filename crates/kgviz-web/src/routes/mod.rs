//! Route handlers.

pub mod health;
pub mod query;
pub mod transform;
