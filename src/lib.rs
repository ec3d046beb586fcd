//! Growth Projection - month-granular projection engine for savings plans
//!
//! This library provides:
//! - Future-value projections with periodic contributions and annual step-up
//! - Monthly, quarterly or yearly compounding
//! - Periodic or end-of-term tax on interest, inflation adjustment
//! - Optimistic/pessimistic variance tracking and goal detection
//! - Plan loading (CSV/JSON), batch runs and CSV export of the yearly breakdown

pub mod currency;
pub mod error;
pub mod plan;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::PlanError;
pub use plan::{CompoundingFrequency, ContributionFrequency, PlanInputs, TaxTiming};
pub use projection::{project, ProjectionConfig, ProjectionEngine, ProjectionResult, YearRecord};
pub use scenario::ScenarioRunner;
