use serde::{Deserialize, Serialize};

/// Failure to read a single field or record out of a provider payload or the
/// schedule. Always contained at the record it came from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataRecordParsingError {
    InvalidData,
    InvalidTime(String),
    InvalidTimestamp(String),
    ParseFailure(String),
}

impl std::fmt::Display for DataRecordParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataRecordParsingError::InvalidData => write!(f, "Invalid data encountered while parsing data"),
            DataRecordParsingError::InvalidTime(s) => write!(f, "Invalid clock time: {s}"),
            DataRecordParsingError::InvalidTimestamp(s) => write!(f, "Invalid timestamp: {s}"),
            DataRecordParsingError::ParseFailure(s) => write!(f, "Data parse failure: {s}"),
        }
    }
}

impl std::error::Error for DataRecordParsingError {}
