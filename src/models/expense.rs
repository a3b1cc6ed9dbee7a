//! Expense model
//!
//! An expense is a single tracked spending entry. The record's field order is
//! the order written to the backing document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;

/// A tracked expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub name: String,

    /// Amount spent
    pub nominal: f64,

    /// Free-form category, matched case-insensitively
    pub category: String,

    /// When the expense was recorded; never changes after creation
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense dated now
    pub fn new(
        id: ExpenseId,
        name: impl Into<String>,
        nominal: f64,
        category: impl Into<String>,
    ) -> Self {
        Self::with_date(id, name, nominal, category, Utc::now())
    }

    /// Create an expense with an explicit date
    pub fn with_date(
        id: ExpenseId,
        name: impl Into<String>,
        nominal: f64,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            nominal,
            category: category.into(),
            date,
        }
    }

    /// Check whether this expense belongs to a category (case-insensitive)
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Check whether this expense falls within `[start, end]`
    pub fn within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.date >= start && self.date <= end
    }

    /// Apply a partial update. Omitted fields keep their current values and
    /// supplied ones must be valid; `id` and `date` are never touched.
    pub fn apply(&mut self, update: &ExpenseUpdate) -> Result<(), ExpenseValidationError> {
        let name = supplied_text(&update.name, "name")?;
        let category = supplied_text(&update.category, "category")?;
        if let Some(nominal) = update.nominal {
            validate_nominal(nominal)?;
        }

        if let Some(name) = name {
            self.name = name.to_string();
        }
        if let Some(nominal) = update.nominal {
            self.nominal = nominal;
        }
        if let Some(category) = category {
            self.category = category.to_string();
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} ({})",
            self.id, self.name, self.nominal, self.category
        )
    }
}

/// Fields supplied when creating an expense
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewExpense {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nominal: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewExpense {
    /// Create a fully populated input
    pub fn new(name: impl Into<String>, nominal: f64, category: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            nominal: Some(nominal),
            category: Some(category.into()),
        }
    }

    /// Validate the input and build the record it describes
    pub fn into_expense(
        self,
        id: ExpenseId,
        date: DateTime<Utc>,
    ) -> Result<Expense, ExpenseValidationError> {
        let (name, nominal, category) = match (
            present(&self.name),
            self.nominal,
            present(&self.category),
        ) {
            (Some(name), Some(nominal), Some(category)) => (name, nominal, category),
            _ => return Err(ExpenseValidationError::MissingFields),
        };

        validate_nominal(nominal)?;

        Ok(Expense::with_date(id, name, nominal, category, date))
    }
}

/// Fields supplied when updating an expense
///
/// Every field follows the same rule: `None` keeps the current value, and a
/// supplied value must be valid (non-blank text, positive finite nominal).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    /// Replacement name; must not be blank
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement amount; must be positive and finite
    #[serde(default)]
    pub nominal: Option<f64>,
    /// Replacement category; must not be blank
    #[serde(default)]
    pub category: Option<String>,
}

impl ExpenseUpdate {
    /// Check whether the update supplies no fields at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.nominal.is_none() && self.category.is_none()
    }
}

/// A text field counts as present only when it holds something besides whitespace
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A supplied text field must hold something besides whitespace
fn supplied_text<'a>(
    field: &'a Option<String>,
    label: &'static str,
) -> Result<Option<&'a str>, ExpenseValidationError> {
    match field {
        None => Ok(None),
        Some(_) => present(field)
            .map(Some)
            .ok_or(ExpenseValidationError::BlankField(label)),
    }
}

fn validate_nominal(nominal: f64) -> Result<(), ExpenseValidationError> {
    if nominal.is_finite() && nominal > 0.0 {
        Ok(())
    } else {
        Err(ExpenseValidationError::InvalidNominal(nominal))
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    MissingFields,
    BlankField(&'static str),
    InvalidNominal(f64),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Name, nominal, and category cannot be empty"),
            Self::BlankField(field) => write!(f, "{} cannot be empty", field),
            Self::InvalidNominal(value) => {
                write!(f, "Nominal must be a positive number, got {}", value)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
