//! Custom error types for the review dashboard pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Every fatal
//! condition of a run (missing input, schema violations, unwritable output)
//! surfaces as a [`DashboardError`]; locally recoverable problems such as an
//! unparseable date never become errors.
//!
//! Errors are serializable as `{code, message}` so they can be emitted by
//! `--json` mode without losing the machine-readable code.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the dashboard pipeline.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Input table does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(String),

    /// One or more required columns are absent from the input header.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A value violates the record schema (e.g. a non-integer rating).
    #[error("Invalid value in column '{column}' at row {row}: '{value}' ({reason})")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
        reason: String,
    },

    /// The input table has a header but no data rows.
    #[error("Input table contains no reviews")]
    EmptyDataset,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Report rendering failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DashboardError>,
    },
}

impl DashboardError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DashboardError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build an [`DashboardError::InvalidValue`] for a data row.
    ///
    /// `row` is the 1-based data row number (the header is not counted).
    pub fn invalid_value(
        column: impl Into<String>,
        row: usize,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DashboardError::InvalidValue {
            column: column.into(),
            row,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "INPUT_NOT_FOUND",
            Self::MissingColumns(_) => "MISSING_COLUMNS",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is a schema violation in the input table.
    pub fn is_schema_violation(&self) -> bool {
        match self {
            Self::MissingColumns(_) | Self::InvalidValue { .. } => true,
            Self::WithContext { source, .. } => source.is_schema_violation(),
            _ => false,
        }
    }
}

impl Serialize for DashboardError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DashboardError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DashboardError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DashboardError::Io(e).with_context(context))
    }
}
