//! Core projection engine for month-by-month plan projections

use super::normalize::NormalizedPlan;
use super::results::{MonthRecord, ProjectionResult, YearRecord};
use super::state::SimulationState;
use crate::plan::{PlanInputs, TaxTiming};
use log::debug;
use std::env;

/// Default cap on simulated months (100 years)
pub const DEFAULT_MAX_MONTHS: u32 = 1200;

/// Default optimistic/pessimistic offset (2 percentage points)
pub const DEFAULT_VARIANCE_SPREAD: f64 = 0.02;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Horizons longer than this are silently truncated
    pub max_months: u32,

    /// Rate offset for the variance shadows, as a decimal
    pub variance_spread: f64,

    /// Whether to keep a record per simulated month
    pub record_months: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            variance_spread: DEFAULT_VARIANCE_SPREAD,
            record_months: false,
        }
    }
}

impl ProjectionConfig {
    /// Read overrides from PROJECTION_MAX_MONTHS and PROJECTION_VARIANCE_SPREAD
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_months = env::var("PROJECTION_MAX_MONTHS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_months);

        let variance_spread = env::var("PROJECTION_VARIANCE_SPREAD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.variance_spread);

        Self {
            max_months,
            variance_spread,
            ..defaults
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run a projection
    pub fn project(&self, inputs: &PlanInputs) -> ProjectionResult {
        self.run(inputs, self.config.record_months).0
    }

    /// Run a projection and keep one record per simulated month
    pub fn project_with_trace(&self, inputs: &PlanInputs) -> (ProjectionResult, Vec<MonthRecord>) {
        self.run(inputs, true)
    }

    fn run(&self, inputs: &PlanInputs, record_months: bool) -> (ProjectionResult, Vec<MonthRecord>) {
        let plan = NormalizedPlan::from_inputs(inputs, self.config.variance_spread);
        let total_months = plan.total_months(self.config.max_months);
        let years = plan.effective_years(self.config.max_months);

        if i64::from(plan.years) * 12 > i64::from(total_months) {
            debug!(
                "Horizon of {} years truncated to {} simulated months",
                plan.years, total_months
            );
        }
        debug!(
            "Projecting {} months: rate={:.6} optimistic={:.6} pessimistic={:.6} n={}",
            total_months, plan.rate, plan.optimistic_rate, plan.pessimistic_rate, plan.periods_per_year
        );

        let mut result = ProjectionResult::new(plan.initial_deposit);
        let mut state = SimulationState::from_plan(&plan);
        let mut months = Vec::new();
        if record_months {
            months.reserve(total_months as usize);
        }

        let defer_tax = plan.tax_timing == TaxTiming::End;

        for _month in 1..=total_months {
            let record = self.simulate_month(&plan, &mut state, defer_tax, &mut result);
            if record_months {
                months.push(record);
            }
        }

        debug!(
            "Loop finished: balance={:.2} contributed={:.2} gross_interest={:.2}",
            state.balance, state.total_contributed, state.gross_interest
        );

        if defer_tax {
            Self::settle_tax(&plan, &mut state);
        }

        Self::summarize(&plan, &state, years, &mut result);
        (result, months)
    }

    /// One month of the loop: step-up, contribution, interest, goal, snapshot
    fn simulate_month(
        &self,
        plan: &NormalizedPlan,
        state: &mut SimulationState,
        defer_tax: bool,
        result: &mut ProjectionResult,
    ) -> MonthRecord {
        state.advance_month(plan);

        let contribution = state.apply_contribution(plan);
        let compounded = plan.compounding.compounds_in(state.month);
        let (gross_interest, tax) = state.accrue_interest(plan, defer_tax);

        if state.check_goal(plan) {
            debug!("Goal of {:.2} reached in month {}", plan.target, state.month);
        }

        if state.is_year_end() {
            result.add_year(Self::year_record(plan, state));
        }

        MonthRecord {
            month: state.month,
            year: state.year(),
            contribution,
            contribution_baseline: state.current_contribution,
            compounded,
            gross_interest,
            tax,
            balance: state.balance,
            total_deposits: state.total_contributed,
        }
    }

    /// Snapshot of the running state at a year boundary
    fn year_record(plan: &NormalizedPlan, state: &SimulationState) -> YearRecord {
        let year = state.year();
        YearRecord {
            year,
            principal: plan.initial_deposit,
            contributions: state.total_contributed - plan.initial_deposit,
            interest: state.net_growth(),
            total_balance: state.balance,
            inflation_adjusted: deflate(state.balance, plan.inflation, year),
            optimistic_balance: state.optimistic_balance,
            pessimistic_balance: state.pessimistic_balance,
        }
    }

    /// End-of-term tax on net growth; replaces any in-loop tax total
    fn settle_tax(plan: &NormalizedPlan, state: &mut SimulationState) {
        let taxable = state.net_growth();
        if taxable > 0.0 {
            let tax = taxable * plan.tax;
            state.balance -= tax;
            state.total_tax = tax;
            debug!("End-of-term tax {:.2} on taxable growth {:.2}", tax, taxable);
        } else {
            state.total_tax = 0.0;
        }
    }

    /// Post-loop metrics
    fn summarize(plan: &NormalizedPlan, state: &SimulationState, years: u32, result: &mut ProjectionResult) {
        result.total_deposits = state.total_contributed;
        result.total_interest = state.net_growth();
        result.total_tax = state.total_tax;
        result.final_balance = state.balance;
        result.final_balance_adjusted = deflate(state.balance, plan.inflation, years);
        result.goal_reached_year = state.goal_reached_year;

        result.doubling_time = if plan.rate_percent > 0.0 {
            72.0 / plan.rate_percent
        } else {
            0.0
        };

        result.multiplier = if state.total_contributed > 0.0 {
            state.balance / state.total_contributed
        } else {
            0.0
        };
    }
}

/// Present value of `amount` after `years` of inflation
fn deflate(amount: f64, inflation: f64, years: u32) -> f64 {
    amount / (1.0 + inflation).powi(years as i32)
}

/// Project a plan with the default configuration
pub fn project(inputs: &PlanInputs) -> ProjectionResult {
    ProjectionEngine::default().project(inputs)
}
