//! Error types for the dashboard.
//!
//! Selection errors are local validation failures: the caller gets the
//! rejected input back and no partial chart is produced.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the dataset or building a chart.
#[derive(Error, Debug)]
pub enum DashboardError {
    // === Selection Errors ===
    /// The site is neither `ALL` nor one of the catalog sites.
    #[error("invalid site selection '{site}'")]
    InvalidSelection {
        /// The rejected site value.
        site: String,
    },

    /// The payload range has `min > max` or a non-finite bound.
    #[error("invalid payload range [{min}, {max}]: min must not exceed max")]
    InvalidRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },

    /// A ratio has a zero denominator: a site with no launches, or `ALL`
    /// when no launch succeeded.
    #[error("no data to aggregate for '{site}': nothing to divide by")]
    DegenerateAggregate {
        /// The site with zero launches, or `ALL` when no launch succeeded.
        site: String,
    },

    // === Configuration Errors ===
    /// The configured site catalog cannot back the dropdown.
    #[error("invalid site catalog entry '{site}': {reason}")]
    InvalidCatalog {
        /// The offending name.
        site: String,
        /// Why it was rejected.
        reason: String,
    },

    // === Load Errors ===
    /// The data file could not be opened or read.
    #[error("failed to read launch data from {}: {source}", .path.display())]
    DataLoad {
        /// Path to the CSV file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// A row could not be decoded into a launch record.
    #[error("malformed launch record at line {line}: {message}")]
    MalformedRecord {
        /// 1-indexed line in the CSV file.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// The file contained a header but no rows.
    #[error("no launch records found in {}", .0.display())]
    EmptyDataset(PathBuf),
}

impl DashboardError {
    /// Whether this error is a rejected selection rather than a runtime failure.
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidSelection { .. }
                | DashboardError::InvalidRange { .. }
                | DashboardError::DegenerateAggregate { .. }
        )
    }
}

/// Result alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_input_classification() {
        let err = DashboardError::InvalidSelection {
            site: "NONEXISTENT".to_string(),
        };
        assert!(err.is_rejected_input());
        assert!(DashboardError::InvalidRange { min: 9000.0, max: 1000.0 }.is_rejected_input());
        assert!(!DashboardError::EmptyDataset(PathBuf::from("x.csv")).is_rejected_input());
        assert!(!DashboardError::InvalidCatalog {
            site: "ALL".to_string(),
            reason: "reserved".to_string(),
        }
        .is_rejected_input());
    }

    #[test]
    fn test_error_messages() {
        let err = DashboardError::InvalidRange {
            min: 9000.0,
            max: 1000.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid payload range [9000, 1000]: min must not exceed max"
        );

        let err = DashboardError::DegenerateAggregate {
            site: "KSC LC-39A".to_string(),
        };
        assert!(err.to_string().contains("KSC LC-39A"));
    }
}
