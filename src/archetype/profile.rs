//! Archetype profile definitions matching the segment parameter format

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Period model governing how a cohort's revenue accrues and decays.
///
/// Both variants are instances of "accrue × decay over a time series" but
/// they differ in granularity and in the order decay is applied within a
/// period. The timing difference is intentional and must not be merged:
/// it changes numeric output by one period's decay factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodModel {
    /// Fine-grained survival compounding: 12 periods per reporting year.
    /// Each month the survival probability decays by (1 - churn), then the
    /// flat period fee weighted by survival is accrued into a cumulative
    /// total. Snapshots are taken at every 12th month.
    MonthlySurvival,

    /// Coarse annual growth/retention: 1 period per reporting year.
    /// Each year books base_revenue * (1 + growth)^year against the
    /// remaining cohort fraction, then retention decay shrinks the cohort
    /// for subsequent years only.
    AnnualRetention,
}

impl PeriodModel {
    /// Number of accrual periods per reporting year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PeriodModel::MonthlySurvival => 12,
            PeriodModel::AnnualRetention => 1,
        }
    }
}

/// A single archetype's fixed behavioral parameters.
///
/// Profiles are read-only configuration: the table is constructed once at
/// startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    /// Unique archetype identifier (allocation key)
    pub id: String,

    /// Human-readable display label
    pub label: String,

    /// Base/initial periodic revenue per seller (annual model's accrual base)
    pub base_revenue: f64,

    /// Periodic revenue growth rate (>= -1)
    pub growth_rate: f64,

    /// Periodic churn rate, in [0, 1)
    pub churn_rate: f64,

    /// Flat per-period fee (monthly model's accrual base)
    pub period_fee: f64,
}

impl ArchetypeProfile {
    /// Create a new archetype profile
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        base_revenue: f64,
        growth_rate: f64,
        churn_rate: f64,
        period_fee: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            base_revenue,
            growth_rate,
            churn_rate,
            period_fee,
        }
    }

    /// Retention rate = 1 - churn rate
    pub fn retention_rate(&self) -> f64 {
        1.0 - self.churn_rate
    }

    /// Check the profile invariants: churn in [0,1), growth >= -1,
    /// non-negative revenue and fee, finite values throughout
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let fail = |reason: &str| {
            Err(ProjectionError::InvalidProfile {
                archetype: self.id.clone(),
                reason: reason.to_string(),
            })
        };

        if !(self.churn_rate.is_finite() && (0.0..1.0).contains(&self.churn_rate)) {
            return fail("churn_rate must be in [0, 1)");
        }
        if !(self.growth_rate.is_finite() && self.growth_rate >= -1.0) {
            return fail("growth_rate must be finite and >= -1");
        }
        if !(self.base_revenue.is_finite() && self.base_revenue >= 0.0) {
            return fail("base_revenue must be finite and >= 0");
        }
        if !(self.period_fee.is_finite() && self.period_fee >= 0.0) {
            return fail("period_fee must be finite and >= 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> ArchetypeProfile {
        ArchetypeProfile::new("born_successful", "Born Successful", 2029.95, 0.05, 0.0704, 52.28)
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(valid_profile().validate().is_ok());
    }

    #[test]
    fn test_retention_rate() {
        let profile = valid_profile();
        assert!((profile.retention_rate() - 0.9296).abs() < 1e-12);
    }

    #[test]
    fn test_churn_out_of_range_rejected() {
        let mut profile = valid_profile();
        profile.churn_rate = 1.0;
        assert!(matches!(
            profile.validate(),
            Err(ProjectionError::InvalidProfile { .. })
        ));

        profile.churn_rate = -0.01;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_growth_below_negative_one_rejected() {
        let mut profile = valid_profile();
        profile.growth_rate = -1.5;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_nan_rates_rejected() {
        let mut profile = valid_profile();
        profile.churn_rate = f64::NAN;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let mut profile = valid_profile();
        profile.base_revenue = -1.0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PeriodModel::MonthlySurvival.periods_per_year(), 12);
        assert_eq!(PeriodModel::AnnualRetention.periods_per_year(), 1);
    }
}
