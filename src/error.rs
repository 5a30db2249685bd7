//! Error types for the comparison pipeline

use thiserror::Error;

/// Which history of a run an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Objective,
    LowerBound,
}

impl std::fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryKind::Objective => write!(f, "objective history"),
            HistoryKind::LowerBound => write!(f, "lower bound history"),
        }
    }
}

/// Errors that abort a comparison run
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Duplicate instance '{instance}' in result set '{set}'")]
    DuplicateInstance { set: String, instance: String },

    #[error("Non-numeric value in {history} of instance '{instance}'")]
    NonNumericValue {
        instance: String,
        history: HistoryKind,
    },

    #[error("Timestamps go backwards in {history} of instance '{instance}'")]
    UnorderedHistory {
        instance: String,
        history: HistoryKind,
    },

    #[error("Empty {history} for instance '{instance}' after trimming")]
    EmptyHistory {
        instance: String,
        history: HistoryKind,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid instance filter: {0}")]
    InvalidFilter(#[from] regex::Error),
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_set_and_instance() {
        let err = CompareError::DuplicateInstance {
            set: "v1".to_string(),
            instance: "jobshop_abz5".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("v1"));
        assert!(msg.contains("jobshop_abz5"));
    }

    #[test]
    fn test_history_kind_display() {
        let err = CompareError::EmptyHistory {
            instance: "demo".to_string(),
            history: HistoryKind::LowerBound,
        };
        assert_eq!(
            err.to_string(),
            "Empty lower bound history for instance 'demo' after trimming"
        );
    }
}
