//! Calculation history records and saving them for the signed-in user

use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::currency::ConversionResult;
use crate::error::HistoryError;
use crate::projection::{ProjectionInput, ProjectionResult};
use crate::session::{IdentityProvider, Session};
use crate::store::{DocumentStore, CONVERSION_HISTORY_FIELD, SAVINGS_CALCULATIONS_FIELD};

/// Number of entries the dashboard lists per history
pub const DASHBOARD_RECENT_LIMIT: usize = 5;

/// ISO-8601 UTC timestamp with millisecond precision (`2024-05-01T12:00:00.000Z`)
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Stored snapshot of one savings calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsCalculationRecord {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    /// Annual rate in percent
    pub interest_rate: f64,
    pub years: i32,
    pub final_amount: f64,
    pub total_interest: f64,
    pub timestamp: String,
}

impl SavingsCalculationRecord {
    pub fn new(input: &ProjectionInput, result: &ProjectionResult, at: DateTime<Utc>) -> Self {
        Self {
            initial_amount: input.initial_amount,
            monthly_contribution: input.monthly_contribution,
            interest_rate: input.annual_interest_rate_percent,
            years: input.years,
            final_amount: result.final_balance(),
            total_interest: result.total_interest(),
            timestamp: iso_timestamp(at),
        }
    }
}

/// Stored snapshot of one currency conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub result: f64,
    pub rate: f64,
    pub timestamp: String,
}

impl ConversionRecord {
    pub fn new(conversion: &ConversionResult, at: DateTime<Utc>) -> Self {
        Self {
            from_currency: conversion.from_currency.clone(),
            to_currency: conversion.to_currency.clone(),
            amount: conversion.amount,
            result: conversion.result,
            rate: conversion.rate,
            timestamp: iso_timestamp(at),
        }
    }
}

/// Append a savings calculation to the signed-in user's history
pub fn save_savings_calculation<S, P>(
    store: &S,
    session: &Session<P>,
    record: &SavingsCalculationRecord,
) -> Result<(), HistoryError>
where
    S: DocumentStore + ?Sized,
    P: IdentityProvider,
{
    let user = session.current_user().ok_or(HistoryError::NotSignedIn)?;
    store.append_to_array_field(&user.uid, SAVINGS_CALCULATIONS_FIELD, serde_json::to_value(record)?)?;
    info!("saved savings calculation for {}", user.uid);
    Ok(())
}

/// Append a currency conversion to the signed-in user's history
pub fn save_conversion<S, P>(
    store: &S,
    session: &Session<P>,
    record: &ConversionRecord,
) -> Result<(), HistoryError>
where
    S: DocumentStore + ?Sized,
    P: IdentityProvider,
{
    let user = session.current_user().ok_or(HistoryError::NotSignedIn)?;
    store.append_to_array_field(&user.uid, CONVERSION_HISTORY_FIELD, serde_json::to_value(record)?)?;
    info!("saved conversion for {}", user.uid);
    Ok(())
}
