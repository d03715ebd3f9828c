//! Error types shared by the projection and aggregation engines

use thiserror::Error;

use crate::aggregation::ColumnRole;

/// Result alias used throughout the crate
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised by a single computation or load call
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Non-positive principal or tenure, or a negative rate.
    /// `amortize` turns this into an all-zero result instead of surfacing it.
    #[error("Invalid loan input: principal {principal}, rate {annual_rate_percent}%, tenure {years} years")]
    InvalidLoanInput {
        principal: f64,
        annual_rate_percent: f64,
        years: f64,
    },

    /// A property attribute the projection cannot work with
    #[error("Invalid {field}: {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// One or more required semantic columns could not be matched
    #[error("Missing required columns: {}", format_roles(.roles))]
    MissingColumns { roles: Vec<ColumnRole> },

    /// The dataset contained no records at all
    #[error("The uploaded dataset is empty")]
    EmptyInput,

    /// Every record was dropped during value cleaning
    #[error("No valid rows found in {total} records")]
    NoValidRows { total: usize },

    /// A property CSV row that could not be converted
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_roles(roles: &[ColumnRole]) -> String {
    roles
        .iter()
        .map(|role| role.describe())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_every_role() {
        let err = AnalysisError::MissingColumns {
            roles: vec![ColumnRole::Value, ColumnRole::Size],
        };
        let message = err.to_string();
        assert!(message.starts_with("Missing required columns: "));
        assert!(message.contains(ColumnRole::Value.label()));
        assert!(message.contains(ColumnRole::Size.label()));
    }

    #[test]
    fn test_no_valid_rows_message() {
        let err = AnalysisError::NoValidRows { total: 12 };
        assert_eq!(err.to_string(), "No valid rows found in 12 records");
    }
}
