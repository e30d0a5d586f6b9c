//! Scenario runner for batch projections
//!
//! Runs many independent projections in parallel. Every input is projected
//! on its own, so one invalid row never affects its neighbours.

pub mod loader;

pub use loader::{load_inputs, load_inputs_from_reader};

use log::{info, warn};
use rayon::prelude::*;

use crate::error::Result;
use crate::projection::{project, ProjectionInput, ProjectionResult};

/// Runner for batches and rate comparisons
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// // Compare several rates for the same savings plan
/// let results = runner.run_rates(&input, &[3.0, 4.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Minimum batch size before work is spread across threads
    parallel_threshold: usize,
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self {
            parallel_threshold: 2,
        }
    }

    /// Runner that only parallelises batches of at least `threshold` inputs
    pub fn with_parallel_threshold(threshold: usize) -> Self {
        Self {
            parallel_threshold: threshold,
        }
    }

    /// Run a single projection
    pub fn run(&self, input: &ProjectionInput) -> Result<ProjectionResult> {
        project(input)
    }

    /// Run projections for many inputs, preserving input order
    pub fn run_batch(&self, inputs: &[ProjectionInput]) -> Vec<Result<ProjectionResult>> {
        info!("running {} projections", inputs.len());

        let results: Vec<_> = if inputs.len() >= self.parallel_threshold.max(1) {
            inputs.par_iter().map(project).collect()
        } else {
            inputs.iter().map(project).collect()
        };

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("{} of {} projections rejected their input", failed, inputs.len());
        }

        results
    }

    /// Run the same plan at several interest rates
    pub fn run_rates(&self, base: &ProjectionInput, rates: &[f64]) -> Vec<Result<ProjectionResult>> {
        let inputs: Vec<_> = rates.iter().map(|&rate| base.with_rate(rate)).collect();
        self.run_batch(&inputs)
    }
}
