//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside the backing document
    #[error("I/O error: {0}")]
    Io(String),

    /// Missing or malformed required input
    #[error("{0}")]
    Validation(String),

    /// An identifier that is not an integer
    #[error("Id must be integer: {0}")]
    InvalidId(String),

    /// Date range whose start lies after its end
    #[error("startdate is newer than enddate ({start} > {end})")]
    InvalidRange { start: String, end: String },

    /// No record carries the requested identifier
    #[error("Expense with id {0} not found")]
    NotFound(String),

    /// Backing document missing, unreadable or malformed
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Backing document could not be written
    #[error("Storage write error: {0}")]
    StorageWrite(String),
}

impl ExpenseError {
    /// Create a "not found" error for an expense identifier
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound(identifier.into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error stems from the backing document
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageRead(_) | Self::StorageWrite(_))
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
