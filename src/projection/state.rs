//! Running plan state for a single projection

use super::normalize::NormalizedPlan;

/// Gross interest earned on `balance` over one compounding period
pub fn period_interest(balance: f64, annual_rate: f64, periods_per_year: f64) -> f64 {
    balance * (annual_rate / periods_per_year)
}

/// State of the plan at a point in the monthly loop
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current simulated month (1-indexed, 0 before the first month)
    pub month: u32,

    /// Main-scenario balance
    pub balance: f64,

    /// Cumulative amount contributed, seeded with the initial deposit
    pub total_contributed: f64,

    /// Cumulative gross interest, before any tax
    pub gross_interest: f64,

    /// Cumulative tax deducted inside the loop
    pub total_tax: f64,

    /// Per-period contribution after step-ups so far
    pub current_contribution: f64,

    /// Shadow balance accruing at rate + spread
    pub optimistic_balance: f64,

    /// Shadow balance accruing at max(0, rate - spread)
    pub pessimistic_balance: f64,

    /// First year in which the balance met the target; set once
    pub goal_reached_year: Option<u32>,
}

impl SimulationState {
    /// Initialize state from a normalized plan before month 1
    pub fn from_plan(plan: &NormalizedPlan) -> Self {
        let mut state = Self {
            month: 0,
            balance: plan.initial_deposit,
            total_contributed: plan.initial_deposit,
            gross_interest: 0.0,
            total_tax: 0.0,
            current_contribution: plan.contribution,
            optimistic_balance: plan.initial_deposit,
            pessimistic_balance: plan.initial_deposit,
            goal_reached_year: None,
        };
        // A deposit that already meets the goal counts as year 0
        state.check_goal(plan);
        state
    }

    /// Year the current month belongs to (1-indexed)
    pub fn year(&self) -> u32 {
        self.month.div_ceil(12)
    }

    /// Last month of a year
    pub fn is_year_end(&self) -> bool {
        self.month > 0 && self.month % 12 == 0
    }

    /// Advance to the next month, applying the annual step-up on the first
    /// month of every year after the first
    pub fn advance_month(&mut self, plan: &NormalizedPlan) {
        self.month += 1;

        if self.month > 1 && self.month % 12 == 1 && plan.step_up > 0.0 {
            self.current_contribution *= 1.0 + plan.step_up;
        }
    }

    /// Credit this month's contribution to all three balances.
    /// Returns the amount applied.
    pub fn apply_contribution(&mut self, plan: &NormalizedPlan) -> f64 {
        let amount = if plan.yearly_contributions {
            if self.month % 12 == 0 {
                self.current_contribution
            } else {
                0.0
            }
        } else {
            self.current_contribution * plan.contribution_multiplier
        };

        self.balance += amount;
        self.optimistic_balance += amount;
        self.pessimistic_balance += amount;
        self.total_contributed += amount;

        amount
    }

    /// Accrue interest if this is a compounding month.
    /// Returns (gross interest, tax deducted) for the main balance.
    pub fn accrue_interest(&mut self, plan: &NormalizedPlan, defer_tax: bool) -> (f64, f64) {
        if !plan.compounding.compounds_in(self.month) {
            return (0.0, 0.0);
        }

        let n = plan.periods_per_year;
        let gross = period_interest(self.balance, plan.rate, n);
        let tax = if defer_tax { 0.0 } else { gross * plan.tax };

        self.balance += gross - tax;
        self.gross_interest += gross;
        self.total_tax += tax;

        // Variance scenarios never pay tax
        self.optimistic_balance += period_interest(self.optimistic_balance, plan.optimistic_rate, n);
        self.pessimistic_balance += period_interest(self.pessimistic_balance, plan.pessimistic_rate, n);

        (gross, tax)
    }

    /// Record the goal year the first time the balance meets the target
    pub fn check_goal(&mut self, plan: &NormalizedPlan) -> bool {
        if self.goal_reached_year.is_some() || !plan.has_target() {
            return false;
        }
        if self.balance >= plan.target {
            self.goal_reached_year = Some(self.year());
            return true;
        }
        false
    }

    /// Net growth: balance above everything contributed
    pub fn net_growth(&self) -> f64 {
        self.balance - self.total_contributed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{CompoundingFrequency, ContributionFrequency, PlanInputs, TaxTiming};
    use approx::assert_abs_diff_eq;

    fn plan(inputs: &PlanInputs) -> NormalizedPlan {
        NormalizedPlan::from_inputs(inputs, 0.02)
    }

    #[test]
    fn test_step_up_on_year_boundary() {
        let mut inputs = PlanInputs::new(0.0, 100.0, 0.0, 3);
        inputs.annual_step_up = 10.0;
        let plan = plan(&inputs);
        let mut state = SimulationState::from_plan(&plan);

        for _ in 0..12 {
            state.advance_month(&plan);
            assert_eq!(state.current_contribution, 100.0);
        }
        state.advance_month(&plan);
        assert_eq!(state.month, 13);
        assert_abs_diff_eq!(state.current_contribution, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn test_yearly_contribution_lands_in_month_12() {
        let mut inputs = PlanInputs::new(0.0, 1200.0, 0.0, 1);
        inputs.contribution_frequency = ContributionFrequency::Yearly;
        let plan = plan(&inputs);
        let mut state = SimulationState::from_plan(&plan);

        for month in 1..=12 {
            state.advance_month(&plan);
            let applied = state.apply_contribution(&plan);
            if month == 12 {
                assert_eq!(applied, 1200.0);
            } else {
                assert_eq!(applied, 0.0);
            }
        }
        assert_eq!(state.total_contributed, 1200.0);
    }

    #[test]
    fn test_quarterly_interest_skips_other_months() {
        let mut inputs = PlanInputs::new(1000.0, 0.0, 8.0, 1);
        inputs.compounding_frequency = CompoundingFrequency::Quarterly;
        let plan = plan(&inputs);
        let mut state = SimulationState::from_plan(&plan);

        state.advance_month(&plan);
        assert_eq!(state.accrue_interest(&plan, true), (0.0, 0.0));
        state.advance_month(&plan);
        state.advance_month(&plan);
        let (gross, tax) = state.accrue_interest(&plan, true);
        assert_abs_diff_eq!(gross, 20.0, epsilon = 1e-9);
        assert_eq!(tax, 0.0);
        assert_abs_diff_eq!(state.balance, 1020.0, epsilon = 1e-9);
        assert_abs_diff_eq!(state.optimistic_balance, 1025.0, epsilon = 1e-9);
        assert_abs_diff_eq!(state.pessimistic_balance, 1015.0, epsilon = 1e-9);
    }

    #[test]
    fn test_periodic_tax_reduces_credit() {
        let mut inputs = PlanInputs::new(1200.0, 0.0, 12.0, 1);
        inputs.tax_rate = 25.0;
        inputs.tax_timing = TaxTiming::Yearly;
        let plan = plan(&inputs);
        let mut state = SimulationState::from_plan(&plan);

        state.advance_month(&plan);
        let (gross, tax) = state.accrue_interest(&plan, false);
        assert_abs_diff_eq!(gross, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tax, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(state.balance, 1209.0, epsilon = 1e-9);
        assert_abs_diff_eq!(state.gross_interest, 12.0, epsilon = 1e-9);
        // Shadows ignore tax
        assert_abs_diff_eq!(state.optimistic_balance, 1214.0, epsilon = 1e-9);
    }

    #[test]
    fn test_goal_set_once() {
        let mut inputs = PlanInputs::new(0.0, 100.0, 0.0, 3);
        inputs.target_amount = 250.0;
        let plan = plan(&inputs);
        let mut state = SimulationState::from_plan(&plan);
        assert_eq!(state.goal_reached_year, None);

        for _ in 0..3 {
            state.advance_month(&plan);
            state.apply_contribution(&plan);
            state.check_goal(&plan);
        }
        assert_eq!(state.goal_reached_year, Some(1));

        state.balance = 0.0;
        assert!(!state.check_goal(&plan));
        assert_eq!(state.goal_reached_year, Some(1));
    }

    #[test]
    fn test_goal_met_by_deposit() {
        let mut inputs = PlanInputs::new(2_000_000.0, 0.0, 5.0, 10);
        inputs.target_amount = 1_000_000.0;
        let state = SimulationState::from_plan(&plan(&inputs));
        assert_eq!(state.goal_reached_year, Some(0));
    }
}
