//! Aggregate query results

use serde::{Deserialize, Serialize};

use super::expense::Expense;

/// Sum of all expenses in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// The category as it was requested
    pub category: String,
    pub total_expenses: f64,
}

/// Sum of all expenses dated within an inclusive range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeTotal {
    /// The range bounds as they were requested
    pub start_date: String,
    pub end_date: String,
    pub total_expenses: f64,
}

/// Result of a list query
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseListing {
    /// Every record, in stored order
    All(Vec<Expense>),
    ByCategory(CategoryTotal),
    ByDateRange(DateRangeTotal),
}

/// Sum the nominal amounts of a set of expenses
pub fn total<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> f64 {
    expenses.into_iter().map(|e| e.nominal).sum()
}
