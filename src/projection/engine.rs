//! Core projection engine: monthly compounding collapsed into yearly rows

use log::debug;

use super::input::ProjectionInput;
use super::schedule::{ProjectionResult, YearlyProjection};
use super::state::ProjectionState;
use crate::error::{ProjectionError, Result};

/// Months simulated per projected year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Rows reserved up front; longer schedules grow as they are emitted
const PREALLOCATED_YEARS: usize = 64;

/// Project a savings account year by year
///
/// Interest compounds monthly on the balance before that month's
/// contribution. Yearly rows are rounded to whole currency units; the
/// running balance is not.
pub fn project(input: &ProjectionInput) -> Result<ProjectionResult> {
    input.validate()?;

    debug!(
        "projecting {} years: initial={} monthly={} rate={}%",
        input.years, input.initial_amount, input.monthly_contribution, input.annual_interest_rate_percent
    );

    let total_months = (input.years as u32)
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| ProjectionError::InvalidInput(format!("{} years is too long to project", input.years)))?;
    let mut result = ProjectionResult::with_capacity((input.years as usize).min(PREALLOCATED_YEARS));
    let mut state = ProjectionState::from_input(input);

    for _month in 1..=total_months {
        state.advance_month();

        if state.is_year_end() {
            result.add_row(YearlyProjection::from_unrounded(
                state.year,
                state.balance,
                state.ytd_interest,
                state.cumulative_contributions,
            ));
        }
    }

    debug!(
        "projection complete: final_balance={} total_interest={}",
        result.final_balance(),
        result.total_interest()
    );

    Ok(result)
}
