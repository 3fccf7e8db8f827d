//! Error taxonomy for the projection core

use thiserror::Error;

/// Errors surfaced by the projection engine and its input boundaries.
///
/// Zero-denominator analytics (zero sellers, zero total LTV) are not errors:
/// they are represented as `None` by the analytics functions and the metric
/// is simply omitted by callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// An allocation or query referenced an archetype id absent from the table
    #[error("unknown archetype '{0}': not present in the profile table")]
    UnknownArchetype(String),

    /// A seller count outside the valid range (negative or above u32::MAX)
    /// was supplied at the boundary
    #[error("invalid allocation for archetype '{archetype}': count {count} is out of range")]
    InvalidAllocation { archetype: String, count: i64 },

    /// A projection was requested over a non-positive horizon
    #[error("invalid horizon: horizon_years must be positive")]
    InvalidHorizon,

    /// A profile with rates outside the invariant ranges was rejected at
    /// table construction or CSV load
    #[error("invalid profile '{archetype}': {reason}")]
    InvalidProfile { archetype: String, reason: String },
}
