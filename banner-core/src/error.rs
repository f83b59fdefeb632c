//! Error types for codec and store operations

use std::fmt;

/// Errors that can occur while decoding stored banner entities
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The fetched batch container itself was null or absent
    MissingBatch,
    /// A composite key did not match the `<priority>-<messageId>` shape
    MalformedKey(String),
    /// A stored level name did not match any recognized level after case
    /// normalization
    UnknownLevel(String),
    /// A stored expiration date could not be parsed as an instant
    InvalidDate(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MissingBatch => write!(f, "Banner batch is missing"),
            DecodeError::MalformedKey(key) => write!(f, "Malformed banner key '{key}'"),
            DecodeError::UnknownLevel(name) => write!(f, "Unknown banner level '{name}'"),
            DecodeError::InvalidDate(raw) => write!(f, "Invalid expiration date '{raw}'"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors that can occur while talking to the settings store
#[derive(Debug)]
pub enum StoreError {
    /// The request itself failed (connection, timeout, invalid body)
    Http(reqwest::Error),
    /// The store answered with a non-success status
    Status(reqwest::StatusCode),
    /// The store answered, but the payload did not decode
    Decode(DecodeError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Http(err) => write!(f, "Request failed: {err}"),
            StoreError::Status(status) => write!(f, "Store returned status {status}"),
            StoreError::Decode(err) => write!(f, "Decode error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Http(err) => Some(err),
            StoreError::Status(_) => None,
            StoreError::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Http(err)
    }
}

impl From<DecodeError> for StoreError {
    fn from(err: DecodeError) -> Self {
        StoreError::Decode(err)
    }
}
