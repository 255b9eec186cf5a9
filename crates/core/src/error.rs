//! Error types for record processing.
//!
//! Every failure the pipeline can hit is converted into a [`ProcessError`];
//! callers branch on [`ProcessError::kind`] to tell "the upload is not a
//! table" apart from "the table has nothing usable in it".

use pingrank_geo::GeoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, ProcessError>;

/// Errors that can occur while ingesting, processing or exporting records.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input stream is not readable as CSV
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A semantically required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Parsing succeeded but no row carries usable coordinates
    #[error("No valid rows: {skipped} of {total} rows had unusable coordinates")]
    NoValidRows {
        /// Data rows seen
        total: usize,
        /// Rows dropped for bad coordinates
        skipped: usize,
    },

    /// The caller-supplied reference point is not a valid coordinate
    #[error("Invalid reference point: {0}")]
    InvalidReference(#[from] GeoError),

    /// Clustering radius is zero, negative or not finite
    #[error("Invalid radius: {0} km (must be positive and finite)")]
    InvalidRadius(f64),

    /// Phone number for the share link is empty
    #[error("Invalid phone number: {0:?}")]
    InvalidPhone(String),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`ProcessError`] for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The data is not tabular or lacks the coordinate columns
    Parse,
    /// The table parsed but holds no usable rows
    NoValidRows,
    /// A caller-supplied parameter was rejected
    InvalidInput,
    /// Configuration problem
    Config,
    /// Reading or writing failed
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Parse => "parse error",
            FailureKind::NoValidRows => "no valid data",
            FailureKind::InvalidInput => "invalid input",
            FailureKind::Config => "configuration error",
            FailureKind::Io => "io error",
        };
        f.write_str(name)
    }
}

/// Error code for programmatic handling.
/// Range: 11xxx for processing errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// CSV stream is malformed
    CsvParse = 11001,
    /// Latitude or longitude column missing
    MissingColumn = 11002,
    /// Zero rows with usable coordinates
    NoValidRows = 11003,
    /// Reference point out of range
    InvalidReference = 11004,
    /// Radius not positive
    InvalidRadius = 11005,
    /// Share phone number empty
    InvalidPhone = 11006,
    /// Configuration problem
    Config = 11007,
    /// IO failure
    Io = 11008,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:05}", self.code())
    }
}

impl ProcessError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProcessError::Csv(_) => ErrorCode::CsvParse,
            ProcessError::MissingColumn(_) => ErrorCode::MissingColumn,
            ProcessError::NoValidRows { .. } => ErrorCode::NoValidRows,
            ProcessError::InvalidReference(_) => ErrorCode::InvalidReference,
            ProcessError::InvalidRadius(_) => ErrorCode::InvalidRadius,
            ProcessError::InvalidPhone(_) => ErrorCode::InvalidPhone,
            ProcessError::Config(_) => ErrorCode::Config,
            ProcessError::Io(_) => ErrorCode::Io,
        }
    }

    /// Returns the coarse failure class.
    pub fn kind(&self) -> FailureKind {
        match self {
            ProcessError::Csv(_) | ProcessError::MissingColumn(_) => FailureKind::Parse,
            ProcessError::NoValidRows { .. } => FailureKind::NoValidRows,
            ProcessError::InvalidReference(_)
            | ProcessError::InvalidRadius(_)
            | ProcessError::InvalidPhone(_) => FailureKind::InvalidInput,
            ProcessError::Config(_) => FailureKind::Config,
            ProcessError::Io(_) => FailureKind::Io,
        }
    }

    /// Suggested process exit code for CLI front ends.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            FailureKind::Parse => exit_codes::PARSE_ERROR,
            FailureKind::NoValidRows | FailureKind::InvalidInput => exit_codes::INVALID_INPUT,
            FailureKind::Config => exit_codes::CONFIG_ERROR,
            FailureKind::Io => exit_codes::FAILURE,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        ProcessError::Config(message.into())
    }
}

/// Exit codes for CLI commands
pub mod exit_codes {
    #![allow(missing_docs)]
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const PARSE_ERROR: i32 = 65;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::CsvParse.to_string(), "E11001");
        assert_eq!(ErrorCode::NoValidRows.to_string(), "E11003");
    }

    #[test]
    fn test_parse_and_no_rows_are_distinct_kinds() {
        let missing = ProcessError::MissingColumn("Latitude".into());
        let empty = ProcessError::NoValidRows { total: 0, skipped: 0 };

        assert_eq!(missing.kind(), FailureKind::Parse);
        assert_eq!(empty.kind(), FailureKind::NoValidRows);
        assert_ne!(missing.exit_code(), empty.exit_code());
    }

    #[test]
    fn test_no_valid_rows_message() {
        let err = ProcessError::NoValidRows { total: 3, skipped: 3 };
        assert_eq!(err.to_string(), "No valid rows: 3 of 3 rows had unusable coordinates");
    }

    #[test]
    fn test_reference_error_from_geo() {
        let geo = pingrank_geo::Coordinate::checked(100.0, 0.0).unwrap_err();
        let err: ProcessError = geo.into();
        assert_eq!(err.code(), ErrorCode::InvalidReference);
        assert_eq!(err.kind(), FailureKind::InvalidInput);
    }
}
