use crate::domain::model::Collection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KpiError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to load {collection}: {source}")]
    CollectionError {
        collection: Collection,
        #[source]
        source: Box<KpiError>,
    },

    #[error("Unexpected payload for {collection}: {message}")]
    PayloadError {
        collection: Collection,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl KpiError {
    /// Wraps a fetch error with the collection it came from.
    pub fn in_collection(self, collection: Collection) -> Self {
        match self {
            already @ KpiError::CollectionError { .. } => already,
            other => KpiError::CollectionError {
                collection,
                source: Box::new(other),
            },
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            KpiError::ApiError(_) | KpiError::HttpStatus { .. } => ErrorSeverity::Medium,
            KpiError::CollectionError { source, .. } => source.severity(),
            KpiError::SerializationError(_) | KpiError::PayloadError { .. } => ErrorSeverity::High,
            KpiError::ConfigError { .. }
            | KpiError::MissingConfigError { .. }
            | KpiError::InvalidConfigValueError { .. }
            | KpiError::ConfigValidationError { .. } => ErrorSeverity::High,
            KpiError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            KpiError::ApiError(_) => "Check network connectivity and the source endpoint",
            KpiError::HttpStatus { status, .. } if *status == 401 || *status == 403 => {
                "Check the API key configured in [source.headers]"
            }
            KpiError::HttpStatus { .. } => "The record service rejected the request; retry later",
            KpiError::CollectionError { source, .. } => source.recovery_suggestion(),
            KpiError::IoError(_) => "Check that the snapshot directory exists and is readable",
            KpiError::SerializationError(_) | KpiError::PayloadError { .. } => {
                "The source returned records in an unexpected shape"
            }
            KpiError::ConfigError { .. }
            | KpiError::MissingConfigError { .. }
            | KpiError::InvalidConfigValueError { .. }
            | KpiError::ConfigValidationError { .. } => "Fix the configuration file and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, KpiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_error_keeps_innermost_collection() {
        let err = KpiError::HttpStatus {
            status: 502,
            url: "http://x/kurse".to_string(),
        }
        .in_collection(Collection::Courses)
        .in_collection(Collection::Rooms);

        match &err {
            KpiError::CollectionError { collection, .. } => {
                assert_eq!(*collection, Collection::Courses)
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("kurse"));
    }

    #[test]
    fn test_auth_failures_point_at_api_key() {
        let err = KpiError::HttpStatus {
            status: 401,
            url: "http://x".to_string(),
        };
        assert!(err.recovery_suggestion().contains("API key"));
    }
}
