//! Input normalization: raw plan parameters to per-period rates and amounts

use crate::plan::{CompoundingFrequency, PlanInputs, TaxTiming};

/// Treat NaN/inf as an absent value
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Canonical representation of a plan, ready for the monthly loop
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlan {
    pub initial_deposit: f64,

    /// Contribution per contribution period, before step-up
    pub contribution: f64,

    /// Scales one contribution to its monthly equivalent
    pub contribution_multiplier: f64,

    pub yearly_contributions: bool,

    /// Step-up as a decimal (0.10 for 10%)
    pub step_up: f64,

    /// Nominal annual rate as a decimal
    pub rate: f64,

    /// Rate for the optimistic shadow balance
    pub optimistic_rate: f64,

    /// Rate for the pessimistic shadow balance, floored at zero
    pub pessimistic_rate: f64,

    pub compounding: CompoundingFrequency,

    /// Compounding periods per year
    pub periods_per_year: f64,

    pub inflation: f64,

    pub tax: f64,

    pub tax_timing: TaxTiming,

    /// Goal balance, 0 when disabled
    pub target: f64,

    /// Requested horizon in years, as given
    pub years: i32,

    /// Rate in percent, kept for the Rule of 72
    pub rate_percent: f64,
}

impl NormalizedPlan {
    /// Normalize plan inputs; `variance_spread` is the optimistic/pessimistic
    /// offset as a decimal (0.02 = 2 percentage points)
    pub fn from_inputs(inputs: &PlanInputs, variance_spread: f64) -> Self {
        let rate_percent = finite_or_zero(inputs.interest_rate);
        let rate = rate_percent / 100.0;
        let spread = finite_or_zero(variance_spread);

        Self {
            initial_deposit: finite_or_zero(inputs.initial_deposit),
            contribution: finite_or_zero(inputs.contribution),
            contribution_multiplier: inputs.contribution_frequency.monthly_multiplier(),
            yearly_contributions: inputs.contribution_frequency.is_yearly(),
            step_up: finite_or_zero(inputs.annual_step_up) / 100.0,
            rate,
            optimistic_rate: rate + spread,
            pessimistic_rate: (rate - spread).max(0.0),
            compounding: inputs.compounding_frequency,
            periods_per_year: inputs.compounding_frequency.periods_per_year() as f64,
            inflation: finite_or_zero(inputs.inflation_rate) / 100.0,
            tax: finite_or_zero(inputs.tax_rate) / 100.0,
            tax_timing: inputs.tax_timing,
            target: finite_or_zero(inputs.target_amount),
            years: inputs.years,
            rate_percent,
        }
    }

    /// Whole years actually simulated, given a month cap
    pub fn effective_years(&self, max_months: u32) -> u32 {
        self.total_months(max_months) / 12
    }

    /// Months to simulate: horizon in months, capped, never negative
    pub fn total_months(&self, max_months: u32) -> u32 {
        let requested = (self.years.max(0) as u64) * 12;
        requested.min(max_months as u64) as u32
    }

    /// Whether the goal check is active
    pub fn has_target(&self) -> bool {
        self.target > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::ContributionFrequency;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_variance_rates() {
        let inputs = PlanInputs::new(0.0, 0.0, 7.0, 10);
        let plan = NormalizedPlan::from_inputs(&inputs, 0.02);
        assert_abs_diff_eq!(plan.rate, 0.07, epsilon = 1e-12);
        assert_abs_diff_eq!(plan.optimistic_rate, 0.09, epsilon = 1e-12);
        assert_abs_diff_eq!(plan.pessimistic_rate, 0.05, epsilon = 1e-12);

        let low = NormalizedPlan::from_inputs(&PlanInputs::new(0.0, 0.0, 1.0, 10), 0.02);
        assert_eq!(low.pessimistic_rate, 0.0);
    }

    #[test]
    fn test_contribution_multipliers() {
        let mut inputs = PlanInputs::default();
        inputs.contribution_frequency = ContributionFrequency::Weekly;
        assert_eq!(NormalizedPlan::from_inputs(&inputs, 0.02).contribution_multiplier, 4.333);

        inputs.contribution_frequency = ContributionFrequency::BiWeekly;
        assert_eq!(NormalizedPlan::from_inputs(&inputs, 0.02).contribution_multiplier, 2.166);

        inputs.contribution_frequency = ContributionFrequency::Yearly;
        let plan = NormalizedPlan::from_inputs(&inputs, 0.02);
        assert!(plan.yearly_contributions);
        assert_eq!(plan.contribution_multiplier, 1.0);
    }

    #[test]
    fn test_periods_per_year() {
        let mut inputs = PlanInputs::default();
        inputs.compounding_frequency = CompoundingFrequency::Quarterly;
        assert_eq!(NormalizedPlan::from_inputs(&inputs, 0.02).periods_per_year, 4.0);
        inputs.compounding_frequency = CompoundingFrequency::Yearly;
        assert_eq!(NormalizedPlan::from_inputs(&inputs, 0.02).periods_per_year, 1.0);
    }

    #[test]
    fn test_month_cap() {
        let plan = NormalizedPlan::from_inputs(&PlanInputs::new(0.0, 0.0, 5.0, 150), 0.02);
        assert_eq!(plan.total_months(1200), 1200);
        assert_eq!(plan.effective_years(1200), 100);

        let negative = NormalizedPlan::from_inputs(&PlanInputs::new(0.0, 0.0, 5.0, -4), 0.02);
        assert_eq!(negative.total_months(1200), 0);
    }

    #[test]
    fn test_non_finite_values_become_zero() {
        let mut inputs = PlanInputs::new(f64::NAN, f64::INFINITY, f64::NAN, 5);
        inputs.tax_rate = f64::NEG_INFINITY;
        let plan = NormalizedPlan::from_inputs(&inputs, 0.02);
        assert_eq!(plan.initial_deposit, 0.0);
        assert_eq!(plan.contribution, 0.0);
        assert_eq!(plan.rate, 0.0);
        assert_eq!(plan.tax, 0.0);
    }
}
