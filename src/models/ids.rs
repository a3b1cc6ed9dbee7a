//! Expense identifier
//!
//! Identifiers are positive integers assigned by the repository. Parsing from
//! request text is strict: anything that is not an integer is rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ExpenseError;

/// Integer identifier of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    /// Wrap a raw identifier
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The first identifier handed out for an empty collection
    pub fn first() -> Self {
        Self(1)
    }

    /// The identifier following this one, or `None` once the id space is used up
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Get the raw value
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Parse an identifier supplied as text (path parameter or CLI argument)
    pub fn parse(s: &str) -> Result<Self, ExpenseError> {
        s.parse()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ExpenseId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for ExpenseId {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ExpenseError::InvalidId(s.to_string()))
    }
}
