//! Running account state carried between simulated months

use super::input::ProjectionInput;

/// Unrounded state of the savings account during a projection
///
/// Only emitted records are rounded; this state always carries full
/// precision into the next month.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (0 before the first month)
    pub projection_month: u32,

    /// Year index (1-indexed)
    pub year: u32,

    /// Month within year (1-12)
    pub month_in_year: u32,

    /// Account balance
    pub balance: f64,

    /// Principal plus every contribution so far
    pub cumulative_contributions: f64,

    /// Interest accrued since the start of the current year
    pub ytd_interest: f64,

    monthly_rate: f64,
    monthly_contribution: f64,
}

impl ProjectionState {
    /// Initialize state at projection start
    pub fn from_input(input: &ProjectionInput) -> Self {
        Self {
            projection_month: 0,
            year: 1,
            month_in_year: 0,
            balance: input.initial_amount,
            cumulative_contributions: input.initial_amount,
            ytd_interest: 0.0,
            monthly_rate: input.monthly_rate(),
            monthly_contribution: input.monthly_contribution,
        }
    }

    /// Simulate one month and return the interest it earned
    ///
    /// Interest accrues on the balance before this month's contribution.
    pub fn advance_month(&mut self) -> f64 {
        self.projection_month += 1;
        self.year = (self.projection_month - 1) / 12 + 1;
        self.month_in_year = (self.projection_month - 1) % 12 + 1;

        if self.month_in_year == 1 {
            self.ytd_interest = 0.0;
        }

        let monthly_interest = self.balance * self.monthly_rate;
        self.ytd_interest += monthly_interest;
        self.balance += monthly_interest + self.monthly_contribution;
        self.cumulative_contributions += self.monthly_contribution;

        monthly_interest
    }

    /// Whether the last simulated month closed a year
    pub fn is_year_end(&self) -> bool {
        self.month_in_year == 12
    }
}
