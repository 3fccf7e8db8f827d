//! Archetype parameter tables: profiles, built-in defaults, and CSV loading

mod profile;
pub mod loader;

pub use profile::{ArchetypeProfile, PeriodModel};

use std::collections::HashMap;
use std::path::Path;

use crate::error::ProjectionError;

/// Ordered, validated collection of archetype profiles.
///
/// Declaration order is significant: it is the tie-break order for the
/// efficiency ranking and the iteration order for aggregation, which keeps
/// results deterministic across runs.
#[derive(Debug, Clone)]
pub struct ArchetypeTable {
    profiles: Vec<ArchetypeProfile>,
    index: HashMap<String, usize>,
}

impl ArchetypeTable {
    /// Build a table from profiles, validating each and rejecting duplicates
    pub fn new(profiles: Vec<ArchetypeProfile>) -> Result<Self, ProjectionError> {
        let mut index = HashMap::with_capacity(profiles.len());
        for (i, profile) in profiles.iter().enumerate() {
            profile.validate()?;
            if index.insert(profile.id.clone(), i).is_some() {
                return Err(ProjectionError::InvalidProfile {
                    archetype: profile.id.clone(),
                    reason: "duplicate archetype id".to_string(),
                });
            }
        }
        Ok(Self { profiles, index })
    }

    /// Built-in table for the monthly-survival seller archetypes.
    ///
    /// Parameters are the observed platform averages per segment (monthly
    /// revenue, growth, churn, subscription fee).
    pub fn default_monthly_sellers() -> Self {
        let profiles = vec![
            ArchetypeProfile::new("born_successful", "Born Successful", 2029.95, 0.05, 0.0704, 52.28),
            ArchetypeProfile::new("grown_successful", "Grown Successful", 257.42, 0.05, 0.15, 49.0),
            ArchetypeProfile::new("struggling", "Struggling", 576.49, 0.05, 0.15, 49.23),
            ArchetypeProfile::new("failed", "Failed", 405.39, 0.05, 0.15, 49.30),
        ];
        // Built-in constants satisfy the invariants
        Self::new(profiles).expect("built-in monthly table is valid")
    }

    /// Built-in table for the annual growth/retention segments.
    ///
    /// base_revenue here is the segment's average first-year LTV; churn is
    /// 1 - retention. The flat period fee does not participate in the
    /// annual model.
    pub fn default_annual_segments() -> Self {
        let profiles = vec![
            ArchetypeProfile::new("rising_star", "Rising Star", 15420.50, 0.25, 1.0 - 0.85, 0.0),
            ArchetypeProfile::new("steady_performer", "Steady Performer", 8750.30, 0.15, 1.0 - 0.78, 0.0),
            ArchetypeProfile::new("struggling_seller", "Struggling Seller", 3250.80, 0.08, 1.0 - 0.45, 0.0),
            ArchetypeProfile::new("underperformer", "Underperformer", 1180.20, 0.02, 1.0 - 0.25, 0.0),
        ];
        Self::new(profiles).expect("built-in annual table is valid")
    }

    /// Load a table from a CSV file (see loader module for the format)
    pub fn from_csv_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        loader::load_table(path)
    }

    /// Look up a profile by archetype id
    pub fn get(&self, id: &str) -> Option<&ArchetypeProfile> {
        self.index.get(id).map(|&i| &self.profiles[i])
    }

    /// Whether the table contains the given archetype id
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate profiles in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ArchetypeProfile> {
        self.profiles.iter()
    }

    /// Number of archetypes in the table
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_build() {
        let monthly = ArchetypeTable::default_monthly_sellers();
        assert_eq!(monthly.len(), 4);
        assert!(monthly.contains("born_successful"));
        assert!(monthly.get("failed").is_some());

        let annual = ArchetypeTable::default_annual_segments();
        assert_eq!(annual.len(), 4);
        assert!((annual.get("rising_star").unwrap().retention_rate() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let table = ArchetypeTable::default_monthly_sellers();
        let ids: Vec<&str> = table.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["born_successful", "grown_successful", "struggling", "failed"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let profiles = vec![
            ArchetypeProfile::new("a", "A", 100.0, 0.0, 0.1, 10.0),
            ArchetypeProfile::new("a", "A again", 200.0, 0.0, 0.1, 10.0),
        ];
        assert!(matches!(
            ArchetypeTable::new(profiles),
            Err(ProjectionError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_invalid_profile_rejected_at_build() {
        let profiles = vec![ArchetypeProfile::new("bad", "Bad", 100.0, 0.0, 1.2, 10.0)];
        assert!(ArchetypeTable::new(profiles).is_err());
    }

    #[test]
    fn test_unknown_lookup_is_none() {
        let table = ArchetypeTable::default_monthly_sellers();
        assert!(table.get("nonexistent").is_none());
    }
}
