//! Core projection engine for cohort LTV projections

use crate::allocation::SellerAllocation;
use crate::archetype::{ArchetypeProfile, ArchetypeTable, PeriodModel};
use crate::error::ProjectionError;

use super::result::{ArchetypeSeries, ProjectionResult};

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Projection horizon in reporting years; must be positive
    pub horizon_years: u32,

    /// Period model to project with
    pub model: PeriodModel,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: 5,
            model: PeriodModel::MonthlySurvival,
        }
    }
}

/// Main projection engine.
///
/// Pure function of (archetype table, allocation, config): identical inputs
/// produce identical outputs. Accrual order within a series is fixed
/// left-to-right, period 1 to period N.
pub struct ProjectionEngine {
    table: ArchetypeTable,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given table and config
    pub fn new(table: ArchetypeTable, config: ProjectionConfig) -> Self {
        Self { table, config }
    }

    pub fn table(&self) -> &ArchetypeTable {
        &self.table
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project a single archetype cohort of `seller_count` sellers.
    ///
    /// A zero count short-circuits to an all-zero series of the correct
    /// length without touching the arithmetic, so undefined rates on an
    /// unused archetype can never leak into the output.
    pub fn project_cohort(
        &self,
        archetype_id: &str,
        seller_count: u32,
    ) -> Result<ArchetypeSeries, ProjectionError> {
        if self.config.horizon_years == 0 {
            return Err(ProjectionError::InvalidHorizon);
        }

        let profile = self
            .table
            .get(archetype_id)
            .ok_or_else(|| ProjectionError::UnknownArchetype(archetype_id.to_string()))?;

        if seller_count == 0 {
            return Ok(ArchetypeSeries::zeroed(
                archetype_id.to_string(),
                self.config.horizon_years,
            ));
        }

        let (unit_booked, unit_cumulative) = self.unit_series(profile);

        // Scale the single-seller series by the count as a final scalar
        // multiplication. This makes the output exactly linear in count.
        let count = seller_count as f64;
        let booked: Vec<f64> = unit_booked.iter().map(|v| v * count).collect();
        let cumulative: Vec<f64> = unit_cumulative.iter().map(|v| v * count).collect();
        let total = cumulative.last().copied().unwrap_or(0.0);

        Ok(ArchetypeSeries {
            archetype_id: archetype_id.to_string(),
            seller_count,
            booked,
            cumulative,
            total,
        })
    }

    /// Project the full portfolio allocation.
    ///
    /// Archetypes in the table but absent from the allocation count as zero;
    /// allocation entries naming an archetype not in the table fail the call.
    pub fn project(&self, allocation: &SellerAllocation) -> Result<ProjectionResult, ProjectionError> {
        if self.config.horizon_years == 0 {
            return Err(ProjectionError::InvalidHorizon);
        }

        for (archetype_id, _count) in allocation.iter() {
            if !self.table.contains(archetype_id) {
                return Err(ProjectionError::UnknownArchetype(archetype_id.to_string()));
            }
        }

        let mut result = ProjectionResult::new(self.config.horizon_years);

        // Table declaration order fixes both the aggregation order and the
        // order of per-archetype series in the result.
        for profile in self.table.iter() {
            let series = self.project_cohort(&profile.id, allocation.count(&profile.id))?;
            result.add_series(series);
        }

        log::debug!(
            "projected {} archetypes over {} years: final total {:.2}",
            result.per_archetype.len(),
            result.horizon_years,
            result.final_total(),
        );

        Ok(result)
    }

    /// Expected single-seller (booked, cumulative) series for a profile
    fn unit_series(&self, profile: &ArchetypeProfile) -> (Vec<f64>, Vec<f64>) {
        match self.config.model {
            PeriodModel::MonthlySurvival => self.monthly_survival_unit(profile),
            PeriodModel::AnnualRetention => self.annual_retention_unit(profile),
        }
    }

    /// Survival-compounding model: churn decay applies BEFORE the period's
    /// accrual, so month 1 already carries one decay factor. The flat period
    /// fee is the only revenue source in this variant.
    fn monthly_survival_unit(&self, profile: &ArchetypeProfile) -> (Vec<f64>, Vec<f64>) {
        let horizon = self.config.horizon_years as usize;
        let months = self.config.horizon_years * 12;

        let mut booked = Vec::with_capacity(horizon);
        let mut cumulative = Vec::with_capacity(horizon);

        let mut survival = 1.0;
        let mut running_total = 0.0;
        let mut year_booked = 0.0;

        for month in 1..=months {
            survival *= 1.0 - profile.churn_rate;
            let accrual = profile.period_fee * survival;
            running_total += accrual;
            year_booked += accrual;

            if month % 12 == 0 {
                cumulative.push(running_total);
                booked.push(year_booked);
                year_booked = 0.0;
            }
        }

        (booked, cumulative)
    }

    /// Annual growth/retention model: the year's revenue is booked first,
    /// then retention decay shrinks the cohort. Decay therefore affects only
    /// subsequent years, unlike the monthly variant.
    fn annual_retention_unit(&self, profile: &ArchetypeProfile) -> (Vec<f64>, Vec<f64>) {
        let horizon = self.config.horizon_years as usize;

        let mut booked = Vec::with_capacity(horizon);
        let mut cumulative = Vec::with_capacity(horizon);

        let mut remaining = 1.0;
        let mut growth_factor = 1.0;
        let mut running_total = 0.0;

        for _year in 0..horizon {
            growth_factor *= 1.0 + profile.growth_rate;
            let accrual = profile.base_revenue * growth_factor * remaining;
            running_total += accrual;
            booked.push(accrual);
            cumulative.push(running_total);

            remaining *= profile.retention_rate();
        }

        (booked, cumulative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetype::ArchetypeProfile;

    fn monthly_engine() -> ProjectionEngine {
        ProjectionEngine::new(
            ArchetypeTable::default_monthly_sellers(),
            ProjectionConfig::default(),
        )
    }

    fn annual_engine() -> ProjectionEngine {
        ProjectionEngine::new(
            ArchetypeTable::default_annual_segments(),
            ProjectionConfig {
                horizon_years: 5,
                model: PeriodModel::AnnualRetention,
            },
        )
    }

    #[test]
    fn test_zero_count_yields_zero_series() {
        let engine = monthly_engine();
        let series = engine.project_cohort("born_successful", 0).unwrap();

        assert_eq!(series.cumulative.len(), 5);
        assert!(series.cumulative.iter().all(|&v| v == 0.0));
        assert!(series.booked.iter().all(|&v| v == 0.0));
        assert_eq!(series.total, 0.0);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let engine = ProjectionEngine::new(
            ArchetypeTable::default_monthly_sellers(),
            ProjectionConfig {
                horizon_years: 0,
                model: PeriodModel::MonthlySurvival,
            },
        );

        assert_eq!(
            engine.project_cohort("born_successful", 10).unwrap_err(),
            ProjectionError::InvalidHorizon,
        );

        let allocation = SellerAllocation::from_pairs([("born_successful", 10)]).unwrap();
        assert_eq!(engine.project(&allocation).unwrap_err(), ProjectionError::InvalidHorizon);
    }

    #[test]
    fn test_unknown_archetype_rejected() {
        let engine = monthly_engine();
        assert_eq!(
            engine.project_cohort("no_such_segment", 10).unwrap_err(),
            ProjectionError::UnknownArchetype("no_such_segment".to_string()),
        );

        let mut allocation = SellerAllocation::new();
        allocation.set("no_such_segment", 10).unwrap();
        assert!(matches!(
            engine.project(&allocation).unwrap_err(),
            ProjectionError::UnknownArchetype(_),
        ));
    }

    #[test]
    fn test_monthly_survival_year_one() {
        // churn 0.10, fee 50: cumulative at month 12 = sum_{m=1..12} 50 * 0.9^m
        let table = ArchetypeTable::new(vec![ArchetypeProfile::new(
            "test", "Test", 0.0, 0.0, 0.10, 50.0,
        )])
        .unwrap();
        let engine = ProjectionEngine::new(table, ProjectionConfig::default());

        let series = engine.project_cohort("test", 1).unwrap();

        let mut expected = 0.0;
        let mut survival = 1.0;
        for _ in 0..12 {
            survival *= 0.9;
            expected += 50.0 * survival;
        }
        assert!(expected > 0.0);
        assert!((series.cumulative[0] - expected).abs() < 1e-9);
        // Cumulative series is monotonically non-decreasing
        for window in series.cumulative.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_annual_retention_concrete_scenario() {
        // base 1000, growth 0.10, retention 0.80, count 100
        let table = ArchetypeTable::new(vec![ArchetypeProfile::new(
            "test", "Test", 1000.0, 0.10, 0.20, 0.0,
        )])
        .unwrap();
        let engine = ProjectionEngine::new(
            table,
            ProjectionConfig {
                horizon_years: 5,
                model: PeriodModel::AnnualRetention,
            },
        );

        let series = engine.project_cohort("test", 100).unwrap();

        assert!((series.booked[0] - 110_000.0).abs() < 1e-6);
        assert!((series.booked[1] - 96_800.0).abs() < 1e-6);
        assert!((series.booked[2] - 85_184.0).abs() < 1e-6);

        // None negative, strictly decreasing after year 1 with these rates
        for window in series.booked.windows(2) {
            assert!(window[0] >= 0.0 && window[1] >= 0.0);
            assert!(window[1] < window[0]);
        }

        // Terminal contribution equals the sum of the five booked values
        let booked_sum: f64 = series.booked.iter().sum();
        assert!((series.total - booked_sum).abs() < 1e-6);
    }

    #[test]
    fn test_linearity_in_count() {
        let engine = annual_engine();

        let single = engine.project_cohort("rising_star", 50).unwrap();
        let double = engine.project_cohort("rising_star", 100).unwrap();

        // Exact, not approximate: the unit series is scaled by the count
        assert_eq!(double.total, 2.0 * single.total);
        for (d, s) in double.cumulative.iter().zip(&single.cumulative) {
            assert_eq!(*d, 2.0 * s);
        }
    }

    #[test]
    fn test_portfolio_consistency() {
        let engine = monthly_engine();
        let allocation = SellerAllocation::from_pairs([
            ("born_successful", 226),
            ("grown_successful", 142),
            ("struggling", 708),
            ("failed", 1901),
        ])
        .unwrap();

        let result = engine.project(&allocation).unwrap();
        assert_eq!(result.yearly_totals.len(), 5);

        // Sum of terminal contributions equals the final-year total
        let contribution_sum: f64 = result.per_archetype.iter().map(|s| s.total).sum();
        approx::assert_relative_eq!(contribution_sum, result.final_total(), max_relative = 1e-9);
    }

    #[test]
    fn test_determinism() {
        let engine = annual_engine();
        let allocation = SellerAllocation::from_pairs([
            ("rising_star", 120),
            ("steady_performer", 340),
            ("underperformer", 990),
        ])
        .unwrap();

        let a = engine.project(&allocation).unwrap();
        let b = engine.project(&allocation).unwrap();

        assert_eq!(a.yearly_totals, b.yearly_totals);
        for (sa, sb) in a.per_archetype.iter().zip(&b.per_archetype) {
            assert_eq!(sa.cumulative, sb.cumulative);
        }
    }

    #[test]
    fn test_missing_archetypes_count_as_zero() {
        let engine = monthly_engine();
        let allocation = SellerAllocation::from_pairs([("born_successful", 10)]).unwrap();

        let result = engine.project(&allocation).unwrap();

        // All table archetypes appear in the result, in declaration order
        assert_eq!(result.per_archetype.len(), 4);
        assert_eq!(result.contribution("failed"), Some(0.0));
        assert!(result.contribution("born_successful").unwrap() > 0.0);
    }

    #[test]
    fn test_count_above_ui_cap_computes() {
        let engine = monthly_engine();
        let over_cap = engine.project_cohort("struggling", 50_000).unwrap();
        let unit = engine.project_cohort("struggling", 1).unwrap();
        assert_eq!(over_cap.total, unit.total * 50_000.0);
    }
}
