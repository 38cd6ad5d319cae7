//! Per-record validation errors.
//!
//! A `RecordShapeError` never fails a whole response: the record is
//! skipped and the rest of the batch is kept.

use super::InvalidCountryCode;

/// Why a single upstream record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordShapeError {
    /// The record did not match the expected JSON shape
    #[error("malformed record: {0}")]
    Decode(String),

    /// The record's country code is not ISO 3166-1 alpha-2
    #[error("{0}")]
    InvalidCountryCode(#[from] InvalidCountryCode),

    /// A required field was present but blank
    #[error("required field `{0}` is blank")]
    BlankField(&'static str),
}

impl From<serde_json::Error> for RecordShapeError {
    fn from(err: serde_json::Error) -> Self {
        RecordShapeError::Decode(err.to_string())
    }
}
