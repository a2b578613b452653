//! Error types for the data transforms.
//!
//! Per-element problems that the transforms can route around (a vehicle
//! without coordinates, a quote without a timestamp) are not errors; only
//! the cases below abort a whole call.

use thiserror::Error;

/// Raised by [`crate::vehicles::extract_vehicles`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// A coordinate key matched but its value is not a number.
    #[error("coordinate field '{key}' is not numeric: {value}")]
    Coordinate { key: &'static str, value: String },
}

/// Raised while reading PTAX observations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("unrecognized timestamp '{value}'")]
    Timestamp { value: String },
    #[error("quote field '{key}' is not numeric: {value}")]
    Quote { key: &'static str, value: String },
}

/// Raised when a month argument cannot be turned into a date range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("month must be given as MMYYYY: '{value}'")]
    Format { value: String },
    #[error("month {month} of {year} is out of range")]
    OutOfRange { month: u32, year: i32 },
}

/// Raised by [`crate::regression::fit_linear`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitError {
    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("at least two points are required, got {0}")]
    TooFewPoints(usize),
    #[error("x has zero variance, the normal matrix is singular")]
    Singular,
    #[error("'{token}' on line {line} is not a number")]
    Parse { line: usize, token: String },
}
