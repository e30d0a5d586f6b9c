//! Yearly output structures for projections

use serde::{Deserialize, Serialize};

/// Round to the nearest whole currency unit, half away from zero
pub fn round_currency(value: f64) -> f64 {
    value.round()
}

/// One row of projection output for one year
///
/// All money fields are rounded to whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    /// 1-based year index
    pub year: u32,

    /// Balance after the year's interest and contributions
    pub ending_balance: f64,

    /// Interest accrued during this year only
    pub yearly_interest: f64,

    /// Principal plus all contributions through this year, excluding interest
    pub cumulative_contributions: f64,
}

impl YearlyProjection {
    /// Build a rounded row from unrounded year-end values
    pub fn from_unrounded(
        year: u32,
        ending_balance: f64,
        yearly_interest: f64,
        cumulative_contributions: f64,
    ) -> Self {
        Self {
            year,
            ending_balance: round_currency(ending_balance),
            yearly_interest: round_currency(yearly_interest),
            cumulative_contributions: round_currency(cumulative_contributions),
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Yearly rows, ascending by year
    pub years: Vec<YearlyProjection>,
}

impl ProjectionResult {
    pub fn new() -> Self {
        Self { years: Vec::new() }
    }

    pub fn with_capacity(years: usize) -> Self {
        Self {
            years: Vec::with_capacity(years),
        }
    }

    /// Add a yearly row
    pub fn add_row(&mut self, row: YearlyProjection) {
        self.years.push(row);
    }

    /// Ending balance of the last year (0 for an empty result)
    pub fn final_balance(&self) -> f64 {
        self.years.last().map(|r| r.ending_balance).unwrap_or(0.0)
    }

    /// Sum of the rounded yearly interest across all years
    pub fn total_interest(&self) -> f64 {
        self.years.iter().map(|r| r.yearly_interest).sum()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            total_years: self.years.len() as u32,
            final_balance: self.final_balance(),
            total_interest: self.total_interest(),
            total_contributions: self
                .years
                .last()
                .map(|r| r.cumulative_contributions)
                .unwrap_or(0.0),
        }
    }
}

impl Default for ProjectionResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub final_balance: f64,
    pub total_interest: f64,
    pub total_contributions: f64,
}
