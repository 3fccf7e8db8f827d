//! LTV Simulator - Deterministic seller lifetime-value projection engine
//!
//! This library provides:
//! - Per-archetype cohort revenue projections (monthly-survival and
//!   annual-retention period models)
//! - Portfolio aggregation across archetypes with per-archetype contributions
//! - Derived analytics (per-seller efficiency, contribution shares, best year)
//! - Rule-based insight generation over a completed projection
//! - Batch scenario running for allocation sweeps

pub mod archetype;
pub mod allocation;
pub mod projection;
pub mod analytics;
pub mod insights;
pub mod scenario;
pub mod error;

// Re-export commonly used types
pub use archetype::{ArchetypeProfile, ArchetypeTable, PeriodModel};
pub use allocation::SellerAllocation;
pub use projection::{ProjectionEngine, ProjectionConfig, ProjectionResult, ArchetypeSeries};
pub use error::ProjectionError;
pub use scenario::ScenarioRunner;
