//! Savings projection engine

mod input;
mod state;
mod engine;
mod schedule;
mod recalc;

pub use input::{
    ProjectionInput, DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_INITIAL_AMOUNT,
    DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_YEARS, RATE_SLIDER_MAX, RATE_SLIDER_MIN,
    RATE_SLIDER_STEP, YEAR_OPTIONS,
};
pub use state::ProjectionState;
pub use engine::{project, MONTHS_PER_YEAR};
pub use schedule::{round_currency, ProjectionResult, ProjectionSummary, YearlyProjection};
pub use recalc::Recalculator;
