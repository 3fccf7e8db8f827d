//! Projection engine and result structures

mod engine;
mod result;

pub use engine::{ProjectionEngine, ProjectionConfig};
pub use result::{ProjectionResult, ArchetypeSeries};
