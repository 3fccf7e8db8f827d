//! Derived analytics over a completed projection
//!
//! All functions here are pure, read-only computations. Metrics with a zero
//! denominator (zero sellers, zero total LTV) are undefined and returned as
//! `None` so callers suppress them instead of rendering a zero or infinity.

use serde::{Deserialize, Serialize};

use crate::projection::{ArchetypeSeries, ProjectionResult};

/// One row of the per-seller efficiency ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EfficiencyEntry {
    pub archetype_id: String,
    pub seller_count: u32,
    pub contribution: f64,
    /// Terminal contribution divided by seller count
    pub ltv_per_seller: f64,
}

/// Per-seller efficiency for one archetype series.
/// Undefined when the cohort is empty.
pub fn per_seller_efficiency(series: &ArchetypeSeries) -> Option<f64> {
    if series.seller_count == 0 {
        return None;
    }
    Some(series.total / series.seller_count as f64)
}

/// Rank archetypes with nonzero counts by per-seller efficiency, descending.
///
/// The sort is stable over the result's declaration order, so equal
/// efficiencies keep their table order and the ranking is deterministic.
pub fn efficiency_ranking(result: &ProjectionResult) -> Vec<EfficiencyEntry> {
    let mut entries: Vec<EfficiencyEntry> = result
        .per_archetype
        .iter()
        .filter_map(|series| {
            per_seller_efficiency(series).map(|ltv_per_seller| EfficiencyEntry {
                archetype_id: series.archetype_id.clone(),
                seller_count: series.seller_count,
                contribution: series.total,
                ltv_per_seller,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.ltv_per_seller.total_cmp(&a.ltv_per_seller));
    entries
}

/// Overall average LTV per seller = final total / total seller count.
/// Undefined when no sellers were allocated.
pub fn average_ltv_per_seller(result: &ProjectionResult) -> Option<f64> {
    let total_sellers: u64 = result.per_archetype.iter().map(|s| s.seller_count as u64).sum();
    if total_sellers == 0 {
        return None;
    }
    Some(result.final_total() / total_sellers as f64)
}

/// Contribution share per archetype, in percent of the final total.
/// Undefined when the total LTV is not positive.
pub fn contribution_shares(result: &ProjectionResult) -> Option<Vec<(String, f64)>> {
    let total = result.final_total();
    if total <= 0.0 {
        return None;
    }
    Some(
        result
            .per_archetype
            .iter()
            .map(|s| (s.archetype_id.clone(), s.total / total * 100.0))
            .collect(),
    )
}

/// Index of the best-performing year over the booked (within-year) totals.
/// Ties resolve to the earliest year. `None` for an empty series.
pub fn best_year(result: &ProjectionResult) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in result.yearly_booked_totals.iter().enumerate() {
        match best {
            Some((_, max)) if value <= max => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}
