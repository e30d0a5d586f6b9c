//! Error types for the public API

use thiserror::Error;

/// Failure of the projection engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Failure reported by an identity provider
///
/// The provider's own reason is kept as an opaque, human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
}

/// Failure while registering a new user
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("failed to create user document: {0}")]
    Store(#[from] StoreError),
}

/// Failure while reading or changing a user's profile or credentials
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("no user is signed in")]
    NotSignedIn,

    #[error("new passwords do not match")]
    PasswordMismatch,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure reported by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document already exists: {0}")]
    AlreadyExists(String),

    #[error("field `{field}` of document {key} is not an array")]
    NotAnArray { key: String, field: String },

    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure of the currency-conversion feature
#[derive(Debug, Error)]
pub enum CurrencyError {
    #[error("please enter a valid amount (got {0})")]
    InvalidAmount(f64),

    #[error("exchange rate not available for {0}")]
    RateNotFound(String),

    #[error("unsupported currency {0}")]
    UnsupportedCurrency(String),

    #[error("failed to fetch exchange rates: {0}")]
    Provider(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure while recording a calculation in the user's history
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no user is signed in")]
    NotSignedIn,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode history record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure while loading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failure while loading batch inputs
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
