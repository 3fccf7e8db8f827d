//! Seller allocation: validated archetype -> count mapping

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Mapping from archetype id to a non-negative number of newly acquired
/// sellers.
///
/// Allocations are ephemeral: one is built per user interaction or request,
/// projected, and discarded. Counts are validated at insertion so the
/// projection core never sees a negative or truncated count. The core
/// imposes no semantic upper bound; input caps (e.g. 0-5000 per archetype)
/// are a presentation concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerAllocation {
    counts: HashMap<String, u32>,
}

impl SellerAllocation {
    /// Create an empty allocation (all archetypes implicitly zero)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seller count for an archetype, rejecting counts outside the
    /// representable range (negative, or above u32::MAX) without truncation
    pub fn set(&mut self, archetype: impl Into<String>, count: i64) -> Result<(), ProjectionError> {
        let archetype = archetype.into();
        let count = u32::try_from(count)
            .map_err(|_| ProjectionError::InvalidAllocation {
                archetype: archetype.clone(),
                count,
            })?;
        self.counts.insert(archetype, count);
        Ok(())
    }

    /// Build an allocation from (archetype, count) pairs
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ProjectionError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut allocation = Self::new();
        for (archetype, count) in pairs {
            allocation.set(archetype, count)?;
        }
        Ok(allocation)
    }

    /// Seller count for an archetype (0 if not present)
    pub fn count(&self, archetype: &str) -> u32 {
        self.counts.get(archetype).copied().unwrap_or(0)
    }

    /// Total sellers across all archetypes
    pub fn total_sellers(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// Iterate over explicitly set (archetype, count) entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Whether no archetype has a nonzero count
    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|&c| c == 0)
    }
}
