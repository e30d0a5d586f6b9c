//! File-backed exchange-rate table
//!
//! CSV with columns `currency,rate`, every rate quoted against one anchor
//! currency. Rates for any other listed base are derived as cross rates.

use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use serde::Deserialize;

use super::{ExchangeRateProvider, ExchangeRates};
use crate::error::CurrencyError;

/// Default path to the rate table
pub const DEFAULT_RATES_PATH: &str = "data/rates.csv";

#[derive(Debug, Deserialize)]
struct CsvRow {
    currency: String,
    rate: f64,
}

/// Rates against a single anchor currency
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    anchor: String,
    rates: BTreeMap<String, f64>,
    time_last_updated: i64,
}

impl RateTable {
    /// Build a table from anchor-relative rates; the anchor itself is 1
    pub fn new(anchor: &str, rates: BTreeMap<String, f64>, time_last_updated: i64) -> Self {
        let mut rates = rates;
        rates.insert(anchor.to_string(), 1.0);
        Self {
            anchor: anchor.to_string(),
            rates,
            time_last_updated,
        }
    }

    /// Load rates quoted against `anchor` from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        anchor: &str,
        time_last_updated: i64,
    ) -> Result<Self, CurrencyError> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_reader(file, anchor, time_last_updated)?;
        info!("loaded {} rates from {}", table.rates.len(), path.as_ref().display());
        Ok(table)
    }

    /// Load rates from any reader
    pub fn from_reader<R: std::io::Read>(
        reader: R,
        anchor: &str,
        time_last_updated: i64,
    ) -> Result<Self, CurrencyError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rates = BTreeMap::new();

        for result in csv_reader.deserialize() {
            let row: CsvRow = result?;
            rates.insert(row.currency.trim().to_uppercase(), row.rate);
        }

        Ok(Self::new(anchor, rates, time_last_updated))
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }
}

impl ExchangeRateProvider for RateTable {
    fn get_rates(&self, base: &str) -> Result<ExchangeRates, CurrencyError> {
        let base_rate = self
            .rates
            .get(base)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| CurrencyError::UnsupportedCurrency(base.to_string()))?;

        let rates = self
            .rates
            .iter()
            .map(|(code, rate)| (code.clone(), rate / base_rate))
            .collect();

        Ok(ExchangeRates {
            base: base.to_string(),
            rates,
            time_last_updated: self.time_last_updated,
        })
    }
}
