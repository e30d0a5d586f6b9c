//! Caller-supplied parameters for a single projection

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};

/// Default starting principal offered by the calculator
pub const DEFAULT_INITIAL_AMOUNT: f64 = 1000.0;

/// Default monthly contribution offered by the calculator
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 100.0;

/// Default nominal annual rate, in percent
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 5.0;

/// Default projection horizon in years
pub const DEFAULT_YEARS: i32 = 10;

/// Investment periods offered by the calculator
pub const YEAR_OPTIONS: [i32; 6] = [1, 5, 10, 15, 20, 30];

/// Interest rate slider bounds and step, in percent
pub const RATE_SLIDER_MIN: f64 = 0.0;
pub const RATE_SLIDER_MAX: f64 = 20.0;
pub const RATE_SLIDER_STEP: f64 = 0.1;

/// Inputs for one savings projection
///
/// Negative contributions and rates are accepted as given: they simply
/// shrink the balance. Only the horizon and finiteness are validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    /// Starting principal
    pub initial_amount: f64,

    /// Amount added at the end of every simulated month
    pub monthly_contribution: f64,

    /// Nominal annual rate in percent (5.0 means 5%)
    pub annual_interest_rate_percent: f64,

    /// Number of yearly periods to project
    pub years: i32,
}

impl ProjectionInput {
    pub fn new(
        initial_amount: f64,
        monthly_contribution: f64,
        annual_interest_rate_percent: f64,
        years: i32,
    ) -> Self {
        Self {
            initial_amount,
            monthly_contribution,
            annual_interest_rate_percent,
            years,
        }
    }

    /// Nominal annual rate converted to a fractional monthly rate
    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate_percent / 100.0 / 12.0
    }

    /// Check the input is something the engine can project
    ///
    /// Non-finite amounts or rates are rejected rather than propagated.
    pub fn validate(&self) -> Result<()> {
        if self.years < 1 {
            return Err(ProjectionError::InvalidInput(format!(
                "years must be at least 1, got {}",
                self.years
            )));
        }

        let fields = [
            ("initialAmount", self.initial_amount),
            ("monthlyContribution", self.monthly_contribution),
            ("annualInterestRatePercent", self.annual_interest_rate_percent),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ProjectionError::InvalidInput(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Same input with a different interest rate
    pub fn with_rate(&self, annual_interest_rate_percent: f64) -> Self {
        Self {
            annual_interest_rate_percent,
            ..*self
        }
    }

    /// Bitwise equality of every field (`-0.0` differs from `0.0`)
    pub fn same_as(&self, other: &ProjectionInput) -> bool {
        self.initial_amount.to_bits() == other.initial_amount.to_bits()
            && self.monthly_contribution.to_bits() == other.monthly_contribution.to_bits()
            && self.annual_interest_rate_percent.to_bits()
                == other.annual_interest_rate_percent.to_bits()
            && self.years == other.years
    }
}

impl Default for ProjectionInput {
    fn default() -> Self {
        Self {
            initial_amount: DEFAULT_INITIAL_AMOUNT,
            monthly_contribution: DEFAULT_MONTHLY_CONTRIBUTION,
            annual_interest_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            years: DEFAULT_YEARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        let input = ProjectionInput::new(0.0, 0.0, 6.0, 1);
        assert!((input.monthly_rate() - 0.005).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_non_positive_years() {
        for years in [0, -1, -30] {
            let input = ProjectionInput::new(1000.0, 100.0, 5.0, years);
            assert!(matches!(input.validate(), Err(ProjectionError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let inputs = [
            ProjectionInput::new(f64::NAN, 100.0, 5.0, 1),
            ProjectionInput::new(1000.0, f64::INFINITY, 5.0, 1),
            ProjectionInput::new(1000.0, 100.0, f64::NEG_INFINITY, 1),
        ];
        for input in inputs {
            assert!(input.validate().is_err(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn test_accepts_negative_rate_and_contribution() {
        let input = ProjectionInput::new(1000.0, -50.0, -2.0, 3);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_defaults_match_calculator() {
        let input = ProjectionInput::default();
        assert_eq!(input.initial_amount, 1000.0);
        assert_eq!(input.monthly_contribution, 100.0);
        assert_eq!(input.annual_interest_rate_percent, 5.0);
        assert_eq!(input.years, 10);
        assert!(YEAR_OPTIONS.contains(&input.years));
    }

    #[test]
    fn test_same_as_is_bitwise() {
        let a = ProjectionInput::new(0.0, 100.0, 5.0, 10);
        let b = ProjectionInput::new(-0.0, 100.0, 5.0, 10);
        assert!(a.same_as(&a));
        assert!(!a.same_as(&b));
    }
}
