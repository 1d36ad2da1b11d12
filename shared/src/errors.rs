//! Error types for the workout progress core

use thiserror::Error;

/// Burn recalculation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BurnError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Inconsistent state: {reps} rep entries for {sets} completed sets")]
    InconsistentState { sets: i32, reps: usize },
}

/// Routine-progress reconciliation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Errors raised while turning untrusted JSON into domain structures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Item {index} is missing required field '{field}'")]
    MissingField { index: usize, field: String },

    #[error("Item {index} is invalid: {message}")]
    Invalid { index: usize, message: String },

    #[error("Payload contains no exercises")]
    Empty,
}
