//! Runtime configuration from environment variables
//!
//! Every variable is optional; missing ones fall back to the calculator
//! defaults and are logged. A present but unparsable value is an error.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use log::{info, warn};

use crate::currency::{DEFAULT_BASE_CURRENCY, DEFAULT_RATES_PATH};
use crate::error::ConfigError;
use crate::projection::{
    ProjectionInput, DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_INITIAL_AMOUNT,
    DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_YEARS,
};

pub const RATES_PATH_VAR: &str = "SAVINGS_RATES_PATH";
pub const RATES_ANCHOR_VAR: &str = "SAVINGS_RATES_ANCHOR";
pub const DEFAULT_INITIAL_VAR: &str = "SAVINGS_DEFAULT_INITIAL";
pub const DEFAULT_MONTHLY_VAR: &str = "SAVINGS_DEFAULT_MONTHLY";
pub const DEFAULT_RATE_VAR: &str = "SAVINGS_DEFAULT_RATE";
pub const DEFAULT_YEARS_VAR: &str = "SAVINGS_DEFAULT_YEARS";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// CSV rate table used by the converter
    pub rates_path: PathBuf,

    /// Currency the rate table is quoted against
    pub rates_anchor: String,

    /// Inputs used when a caller leaves a field out
    pub defaults: ProjectionInput,
}

impl Config {
    /// Load from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rates_anchor: String = try_load(&lookup, RATES_ANCHOR_VAR, DEFAULT_BASE_CURRENCY)?;

        Ok(Self {
            rates_path: try_load(&lookup, RATES_PATH_VAR, DEFAULT_RATES_PATH)?,
            rates_anchor: rates_anchor.to_uppercase(),
            defaults: ProjectionInput::new(
                try_load(&lookup, DEFAULT_INITIAL_VAR, DEFAULT_INITIAL_AMOUNT)?,
                try_load(&lookup, DEFAULT_MONTHLY_VAR, DEFAULT_MONTHLY_CONTRIBUTION)?,
                try_load(&lookup, DEFAULT_RATE_VAR, DEFAULT_ANNUAL_RATE_PERCENT)?,
                try_load(&lookup, DEFAULT_YEARS_VAR, DEFAULT_YEARS)?,
            ),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_path: PathBuf::from(DEFAULT_RATES_PATH),
            rates_anchor: DEFAULT_BASE_CURRENCY.to_string(),
            defaults: ProjectionInput::default(),
        }
    }
}

fn try_load<T, F, D>(lookup: &F, key: &str, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
    D: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }
    })
}
