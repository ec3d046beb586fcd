//! Scenario runner for batch projections
//!
//! Holds one configuration and runs many plans or rate variations against it.

use crate::plan::PlanInputs;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use log::info;
use rayon::prelude::*;

/// Runner sharing one engine configuration across many projections
///
/// # Example
/// ```
/// use growth_projection::{PlanInputs, ScenarioRunner};
///
/// let runner = ScenarioRunner::new();
/// let plan = PlanInputs::new(10_000.0, 500.0, 7.0, 10);
/// let results = runner.run_rate_sweep(&plan, &[5.0, 7.0, 9.0]);
/// assert!(results[2].final_balance > results[0].final_balance);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a specific configuration
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, inputs: &PlanInputs) -> ProjectionResult {
        self.engine.project(inputs)
    }

    /// Run many plans in parallel; results keep the input order
    pub fn run_batch(&self, plans: &[PlanInputs]) -> Vec<ProjectionResult> {
        info!("Running batch of {} plans", plans.len());
        plans.par_iter().map(|plan| self.engine.project(plan)).collect()
    }

    /// Run one plan at several interest rates (in percent)
    pub fn run_rate_sweep(&self, inputs: &PlanInputs, rates: &[f64]) -> Vec<ProjectionResult> {
        rates
            .iter()
            .map(|&rate| {
                let plan = PlanInputs {
                    interest_rate: rate,
                    ..inputs.clone()
                };
                self.engine.project(&plan)
            })
            .collect()
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }
}
