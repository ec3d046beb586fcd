//! Plan parameters and plan loading

mod data;
pub mod loader;

pub use data::{CompoundingFrequency, ContributionFrequency, PlanInputs, TaxTiming};
pub use loader::{load_plan_json, load_plans, load_plans_from_reader, plan_from_json};
