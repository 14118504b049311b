use std::path::PathBuf;

use thiserror::Error;

use crate::data::parseable_data_record::DataRecordParsingError;

#[derive(Debug, Error)]
pub enum FerryError {
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("schedule unavailable at {path:?}: {reason}")]
    DataSourceUnavailable { path: PathBuf, reason: String },

    #[error("failed to fetch {provider} forecast: {reason}")]
    UpstreamFetchFailure {
        provider: &'static str,
        reason: String,
    },

    #[error(transparent)]
    FieldParse(#[from] DataRecordParsingError),
}

impl FerryError {
    /// Configuration and schedule errors stop all further processing, everything
    /// else is surfaced as a notice next to whatever partial result exists.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FerryError::ConfigurationMissing(_)
                | FerryError::ConfigurationInvalid(_)
                | FerryError::DataSourceUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_taxonomy() {
        assert!(FerryError::ConfigurationMissing("api key".into()).is_fatal());
        assert!(FerryError::DataSourceUnavailable {
            path: PathBuf::from("ferry_schedule.csv"),
            reason: "not found".into(),
        }
        .is_fatal());
        assert!(!FerryError::UpstreamFetchFailure {
            provider: "marine",
            reason: "503".into(),
        }
        .is_fatal());
        assert!(!FerryError::from(DataRecordParsingError::InvalidData).is_fatal());
    }
}
