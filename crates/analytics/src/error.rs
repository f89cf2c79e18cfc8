//! Error types for the analytics pipeline.
//!
//! Malformed-record variants follow a skip-and-continue policy: the
//! offending row is dropped and counted, the rest of the pipeline runs.
//! Connection failures never originate here; they surface from the data
//! crate before the pipeline starts.

use thiserror::Error;

/// Errors produced by the reconciliation, aggregation and resampling steps.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// An executor custom-info blob failed to parse.
    #[error("malformed custom_info for executor {executor_id}: {reason}")]
    MalformedCustomInfo {
        /// Executor whose blob was rejected.
        executor_id: String,
        /// Parser message.
        reason: String,
    },

    /// An executor config blob failed to parse.
    #[error("malformed config for executor {executor_id}: {reason}")]
    MalformedConfig {
        /// Executor whose blob was rejected.
        executor_id: String,
        /// Parser message.
        reason: String,
    },

    /// A level id does not follow the `{buy|sell}_{n}` convention.
    #[error("malformed level id: {level_id:?}")]
    MalformedLevelId {
        /// The rejected identifier.
        level_id: String,
    },

    /// A close-type wire string is not a known enumeration value.
    #[error("unknown close type {value:?} for executor {executor_id}")]
    UnknownCloseType {
        /// Executor carrying the value.
        executor_id: String,
        /// The rejected wire string.
        value: String,
    },

    /// A candle interval string is not in the supported set.
    #[error("unknown interval {value:?}; valid values: 1m, 3m, 5m, 15m, 30m, 1h, 6h, 1d")]
    UnknownInterval {
        /// The rejected interval string.
        value: String,
    },

    /// Page size must be a positive integer.
    #[error("page size must be positive")]
    InvalidPageSize,
}

impl AnalyticsError {
    /// Creates a malformed custom-info error.
    pub fn malformed_custom_info(executor_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCustomInfo {
            executor_id: executor_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a malformed config error.
    pub fn malformed_config(executor_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedConfig {
            executor_id: executor_id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a malformed level-id error.
    pub fn malformed_level_id(level_id: impl Into<String>) -> Self {
        Self::MalformedLevelId {
            level_id: level_id.into(),
        }
    }

    /// Creates an unknown close-type error.
    pub fn unknown_close_type(executor_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownCloseType {
            executor_id: executor_id.into(),
            value: value.into(),
        }
    }

    /// True when the error concerns a single record rather than the
    /// whole render cycle.
    #[must_use]
    pub fn is_per_record(&self) -> bool {
        matches!(
            self,
            Self::MalformedCustomInfo { .. }
                | Self::MalformedConfig { .. }
                | Self::MalformedLevelId { .. }
                | Self::UnknownCloseType { .. }
        )
    }
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_record_errors() {
        assert!(AnalyticsError::malformed_custom_info("exec-1", "eof").is_per_record());
        assert!(AnalyticsError::malformed_level_id("mid_3").is_per_record());
        assert!(!AnalyticsError::InvalidPageSize.is_per_record());
        assert!(!AnalyticsError::UnknownInterval {
            value: "2h".to_string()
        }
        .is_per_record());
    }

    #[test]
    fn test_error_display_names_the_record() {
        let err = AnalyticsError::malformed_custom_info("exec-1", "unexpected eof");
        assert!(err.to_string().contains("exec-1"));
        assert!(err.to_string().contains("unexpected eof"));

        let err = AnalyticsError::unknown_close_type("exec-2", "LIQUIDATED");
        assert!(err.to_string().contains("exec-2"));
        assert!(err.to_string().contains("LIQUIDATED"));
    }
}
