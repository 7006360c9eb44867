//! Error types for data binding

use thiserror::Error;

/// Errors raised while binding tabular input to data points
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("required {role} column '{column}' not found (available columns: {available})")]
    MissingColumn {
        role: &'static str,
        column: String,
        available: String,
    },

    #[error("invalid number '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        value: String,
        column: String,
        row: usize,
    },

    #[error("CSV must contain at least one data row")]
    Empty,
}

impl DataError {
    /// Create a missing column error listing the available headers
    pub fn missing_column(
        role: &'static str,
        column: impl Into<String>,
        headers: &[String],
    ) -> Self {
        Self::MissingColumn {
            role,
            column: column.into(),
            available: headers.join(", "),
        }
    }

    /// Create an invalid number error (rows are 1-based)
    pub fn invalid_number(value: impl Into<String>, column: impl Into<String>, row: usize) -> Self {
        Self::InvalidNumber {
            value: value.into(),
            column: column.into(),
            row,
        }
    }
}
