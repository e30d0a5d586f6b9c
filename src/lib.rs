//! Savings Projection - compound-interest savings calculator with per-user history
//!
//! This library provides:
//! - Year-by-year savings projections with monthly compounding
//! - Batch and rate-comparison runs
//! - Currency conversion against an exchange-rate provider
//! - Explicit user sessions, profiles and per-user calculation history

pub mod error;
pub mod config;
pub mod projection;
pub mod scenario;
pub mod currency;
pub mod session;
pub mod store;
pub mod history;
pub mod profile;
pub mod format;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use projection::{project, ProjectionInput, ProjectionResult, YearlyProjection, Recalculator};
pub use scenario::ScenarioRunner;
pub use session::{Identity, IdentityProvider, Session};
pub use store::{DocumentStore, UserDocument};
pub use history::{ConversionRecord, SavingsCalculationRecord};
