//! Currency conversion against an exchange-rate provider

mod table;

pub use table::{RateTable, DEFAULT_RATES_PATH};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::CurrencyError;

/// Base used when listing supported currencies
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Rates quoted against one base currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub base: String,
    /// Units of each currency per one unit of `base`
    pub rates: BTreeMap<String, f64>,
    /// Unix seconds of the provider's last update
    pub time_last_updated: i64,
}

/// Outcome of one conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub result: f64,
    pub rate: f64,
    /// Unix milliseconds of the conversion
    pub timestamp: i64,
}

/// Contract of the hosted exchange-rate service
///
/// Implementations report transport or upstream failures as
/// [`CurrencyError::Provider`].
pub trait ExchangeRateProvider {
    fn get_rates(&self, base: &str) -> Result<ExchangeRates, CurrencyError>;
}

/// Convert `amount` of `from` into `to`
///
/// The amount must be a positive number. A missing, zero or non-finite rate
/// counts as not available.
pub fn convert<P: ExchangeRateProvider + ?Sized>(
    provider: &P,
    from: &str,
    to: &str,
    amount: f64,
    at: DateTime<Utc>,
) -> Result<ConversionResult, CurrencyError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CurrencyError::InvalidAmount(amount));
    }

    let rates = provider.get_rates(from)?;
    let rate = rates
        .rates
        .get(to)
        .copied()
        .filter(|rate| rate.is_finite() && *rate != 0.0)
        .ok_or_else(|| CurrencyError::RateNotFound(to.to_string()))?;

    debug!("converting {} {} to {} at {}", amount, from, to, rate);

    Ok(ConversionResult {
        from_currency: from.to_string(),
        to_currency: to.to_string(),
        amount,
        result: amount * rate,
        rate,
        timestamp: at.timestamp_millis(),
    })
}

/// Currency codes the provider quotes against the default base, sorted
pub fn supported_currencies<P: ExchangeRateProvider + ?Sized>(
    provider: &P,
) -> Result<Vec<String>, CurrencyError> {
    let rates = provider.get_rates(DEFAULT_BASE_CURRENCY)?;
    Ok(rates.rates.into_keys().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    struct FixedRates;

    impl ExchangeRateProvider for FixedRates {
        fn get_rates(&self, base: &str) -> Result<ExchangeRates, CurrencyError> {
            if base != "USD" {
                return Err(CurrencyError::Provider("connection refused".to_string()));
            }
            let rates = [("USD", 1.0), ("EUR", 0.92), ("GBP", 0.79), ("XXX", 0.0)]
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect();
            Ok(ExchangeRates {
                base: "USD".to_string(),
                rates,
                time_last_updated: 1_714_521_600,
            })
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_convert() {
        let conversion = convert(&FixedRates, "USD", "EUR", 250.0, at()).unwrap();
        assert_eq!(conversion.rate, 0.92);
        assert_relative_eq!(conversion.result, 230.0, max_relative = 1e-12);
        assert_eq!(conversion.timestamp, 1_714_564_800_000);
    }

    #[test]
    fn test_invalid_amounts() {
        for amount in [0.0, -1.0, f64::NAN] {
            let err = convert(&FixedRates, "USD", "EUR", amount, at()).unwrap_err();
            assert!(matches!(err, CurrencyError::InvalidAmount(_)));
        }
    }

    #[test]
    fn test_rate_not_found_is_distinct_from_provider_failure() {
        let missing = convert(&FixedRates, "USD", "JPY", 1.0, at()).unwrap_err();
        assert!(matches!(missing, CurrencyError::RateNotFound(ref code) if code == "JPY"));

        let zero = convert(&FixedRates, "USD", "XXX", 1.0, at()).unwrap_err();
        assert!(matches!(zero, CurrencyError::RateNotFound(_)));

        let offline = convert(&FixedRates, "EUR", "USD", 1.0, at()).unwrap_err();
        assert!(matches!(offline, CurrencyError::Provider(_)));
    }

    #[test]
    fn test_supported_currencies_sorted() {
        let codes = supported_currencies(&FixedRates).unwrap();
        assert_eq!(codes, vec!["EUR", "GBP", "USD", "XXX"]);
    }
}
