//! Projection engine for periodic-contribution plans

mod normalize;
mod state;
mod engine;
mod results;

pub use normalize::NormalizedPlan;
pub use state::{period_interest, SimulationState};
pub use engine::{project, ProjectionConfig, ProjectionEngine, DEFAULT_MAX_MONTHS, DEFAULT_VARIANCE_SPREAD};
pub use results::{write_breakdown_csv, MonthRecord, ProjectionResult, YearRecord};
