//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while recording attendance and
//! deriving overtime.

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// All fallible operations in the engine return this error type. Pure
/// calculations never use it to signal a zero result: zero overtime is a
/// valid outcome, not a failure.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidTime {
///     input: "9h00".to_string(),
///     reason: "expected HH:MM".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time '9h00': expected HH:MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A clock time was not a valid `HH:MM` value.
    #[error("Invalid time '{input}': {reason}")]
    InvalidTime {
        /// The text that failed to parse.
        input: String,
        /// Why the text was rejected.
        reason: String,
    },

    /// An attendance status code was not recognised.
    #[error("Invalid attendance status '{code}'")]
    InvalidStatus {
        /// The unrecognised code.
        code: String,
    },

    /// A year/month pair does not describe a usable calendar month.
    #[error("Invalid period {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// A day number falls outside the active month.
    #[error("Day {day} is outside the active month ({days_in_month} days)")]
    InvalidDay {
        /// The requested day number.
        day: u32,
        /// The length of the active month.
        days_in_month: u32,
    },

    /// The uploaded roster lacks a required column.
    #[error("Roster is missing required column '{column}'")]
    MissingRosterColumn {
        /// The missing column name.
        column: String,
    },

    /// No roster has been loaded into the session.
    #[error("No roster has been loaded")]
    NoRoster,

    /// The requested roster position does not hold an employee.
    #[error("No employee at roster index {index}")]
    EmployeeNotFound {
        /// The roster index that was requested.
        index: usize,
    },

    /// A stored or imported record had a missing or malformed field.
    #[error("Invalid record field '{field}': {message}")]
    InvalidRecord {
        /// The offending field name.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A persistence sink rejected an operation.
    #[error("{sink} failed: {message}")]
    StoreError {
        /// Which sink failed (record store or backup).
        sink: String,
        /// A description of the failure.
        message: String,
    },

    /// A spreadsheet export could not be written.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the failure.
        message: String,
    },

    /// Neither the record store nor the backup accepted a save.
    #[error("Entry was not saved: record store failed ({store}); backup failed ({backup})")]
    SaveFailed {
        /// The record store failure.
        store: String,
        /// The backup sink failure.
        backup: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
