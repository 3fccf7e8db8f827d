//! Projection output structures

use serde::{Deserialize, Serialize};

/// Per-archetype projection output for one cohort
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeSeries {
    /// Archetype identifier
    pub archetype_id: String,

    /// Seller count this series was projected for
    pub seller_count: u32,

    /// Revenue booked within each reporting year (length = horizon_years)
    pub booked: Vec<f64>,

    /// Cumulative LTV checkpoint at the end of each reporting year
    pub cumulative: Vec<f64>,

    /// Terminal contribution: the final-year cumulative value
    pub total: f64,
}

impl ArchetypeSeries {
    /// An all-zero series of the given horizon length
    pub fn zeroed(archetype_id: String, horizon_years: u32) -> Self {
        let n = horizon_years as usize;
        Self {
            archetype_id,
            seller_count: 0,
            booked: vec![0.0; n],
            cumulative: vec![0.0; n],
            total: 0.0,
        }
    }
}

/// Complete portfolio projection result.
///
/// Results have no identity beyond a single computation: they are produced
/// by one `project` call, read by the caller, and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Projection horizon in reporting years
    pub horizon_years: u32,

    /// Total cumulative LTV at the end of each year, summed across archetypes
    pub yearly_totals: Vec<f64>,

    /// Total revenue booked within each year, summed across archetypes
    pub yearly_booked_totals: Vec<f64>,

    /// Per-archetype series, in table declaration order
    pub per_archetype: Vec<ArchetypeSeries>,
}

impl ProjectionResult {
    pub fn new(horizon_years: u32) -> Self {
        let n = horizon_years as usize;
        Self {
            horizon_years,
            yearly_totals: vec![0.0; n],
            yearly_booked_totals: vec![0.0; n],
            per_archetype: Vec::new(),
        }
    }

    /// Fold a cohort series into the totals and record it.
    /// Summation is elementwise, left-to-right in the order series are added,
    /// which keeps results reproducible.
    pub fn add_series(&mut self, series: ArchetypeSeries) {
        for (total, value) in self.yearly_totals.iter_mut().zip(&series.cumulative) {
            *total += value;
        }
        for (total, value) in self.yearly_booked_totals.iter_mut().zip(&series.booked) {
            *total += value;
        }
        self.per_archetype.push(series);
    }

    /// The series for a given archetype, if present
    pub fn series(&self, archetype_id: &str) -> Option<&ArchetypeSeries> {
        self.per_archetype.iter().find(|s| s.archetype_id == archetype_id)
    }

    /// Terminal contribution for a given archetype, if present
    pub fn contribution(&self, archetype_id: &str) -> Option<f64> {
        self.series(archetype_id).map(|s| s.total)
    }

    /// Final-year total cumulative LTV (0 for an empty horizon)
    pub fn final_total(&self) -> f64 {
        self.yearly_totals.last().copied().unwrap_or(0.0)
    }
}
