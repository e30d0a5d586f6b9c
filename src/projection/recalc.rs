//! Explicit re-projection when calculator inputs change

use log::debug;

use super::engine::project;
use super::input::ProjectionInput;
use super::schedule::ProjectionResult;
use crate::error::Result;

/// Keeps the last projection and recomputes it only for changed inputs
///
/// Callers hand every input edit to [`Recalculator::update`]; nothing is
/// recomputed behind their back.
#[derive(Debug, Clone, Default)]
pub struct Recalculator {
    last: Option<(ProjectionInput, ProjectionResult)>,
}

impl Recalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project `input` unless it matches the previous one
    ///
    /// Returns whether a new projection was computed. A rejected input leaves
    /// the previous projection in place.
    pub fn update(&mut self, input: ProjectionInput) -> Result<bool> {
        if let Some((previous, _)) = &self.last {
            if previous.same_as(&input) {
                return Ok(false);
            }
        }

        let result = project(&input)?;
        debug!("recomputed projection for {:?}", input);
        self.last = Some((input, result));
        Ok(true)
    }

    pub fn input(&self) -> Option<&ProjectionInput> {
        self.last.as_ref().map(|(input, _)| input)
    }

    pub fn result(&self) -> Option<&ProjectionResult> {
        self.last.as_ref().map(|(_, result)| result)
    }
}
