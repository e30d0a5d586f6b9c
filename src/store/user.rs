//! Typed view of a user's stored document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Document;
use crate::error::StoreError;
use crate::history::{iso_timestamp, ConversionRecord, SavingsCalculationRecord};

/// Array field holding currency conversions
pub const CONVERSION_HISTORY_FIELD: &str = "conversionHistory";

/// Array field holding savings calculations
pub const SAVINGS_CALCULATIONS_FIELD: &str = "savingsCalculations";

/// A user's profile and history as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(default, rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    #[serde(default)]
    pub transactions: Vec<Value>,

    #[serde(default)]
    pub conversion_history: Vec<ConversionRecord>,

    #[serde(default)]
    pub savings_calculations: Vec<SavingsCalculationRecord>,
}

impl UserDocument {
    /// Fresh document written at registration
    pub fn new(email: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            email: email.to_string(),
            created_at: Some(iso_timestamp(created_at)),
            display_name: None,
            phone_number: None,
            photo_url: None,
            transactions: Vec::new(),
            conversion_history: Vec::new(),
            savings_calculations: Vec::new(),
        }
    }

    /// Decode from a raw document; absent history arrays read as empty
    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(Value::Object(document))?)
    }

    /// Encode as a raw document
    pub fn to_document(&self) -> Result<Document, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Unavailable(format!(
                "user document encoded as {} instead of an object",
                other
            ))),
        }
    }

    /// Up to `limit` conversions, most recently stored first
    pub fn recent_conversions(&self, limit: usize) -> Vec<&ConversionRecord> {
        self.conversion_history.iter().rev().take(limit).collect()
    }

    /// Up to `limit` savings calculations, most recently stored first
    pub fn recent_savings(&self, limit: usize) -> Vec<&SavingsCalculationRecord> {
        self.savings_calculations.iter().rev().take(limit).collect()
    }
}
