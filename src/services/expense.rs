//! Expense service
//!
//! Business logic for expense records: CRUD operations, identifier
//! assignment, validation, and the two aggregate queries. Every operation is
//! one load-compute-save cycle against the backing document, performed while
//! holding the document's lock.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::summary::total;
use crate::models::{
    CategoryTotal, DateRangeTotal, Expense, ExpenseId, ExpenseListing, ExpenseUpdate, NewExpense,
};
use crate::storage::ExpenseStore;

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a ExpenseStore,
}

/// Options for a list query, as received from the caller
#[derive(Debug, Clone, Default)]
pub struct ExpenseQuery {
    /// Sum expenses in this category
    pub category: Option<String>,
    /// Start of a date range to sum over
    pub start_date: Option<String>,
    /// End of a date range to sum over
    pub end_date: Option<String>,
}

impl ExpenseQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sum by date range
    pub fn date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a ExpenseStore) -> Self {
        Self { store }
    }

    /// List expenses, or compute an aggregate when the query asks for one.
    ///
    /// A category takes priority over a date range. A date range is only
    /// applied when both bounds are given.
    pub fn list(&self, query: &ExpenseQuery) -> ExpenseResult<ExpenseListing> {
        let expenses = {
            let _guard = self.store.lock();
            self.store.load()?
        };

        if let Some(category) = non_blank(&query.category) {
            let total_expenses = total(expenses.iter().filter(|e| e.in_category(category)));
            return Ok(ExpenseListing::ByCategory(CategoryTotal {
                category: category.to_string(),
                total_expenses,
            }));
        }

        if let (Some(start_raw), Some(end_raw)) =
            (non_blank(&query.start_date), non_blank(&query.end_date))
        {
            let start = parse_bound(start_raw)?;
            let end = parse_bound(end_raw)?;

            if start > end {
                return Err(ExpenseError::InvalidRange {
                    start: start_raw.to_string(),
                    end: end_raw.to_string(),
                });
            }

            let total_expenses = total(expenses.iter().filter(|e| e.within(start, end)));
            return Ok(ExpenseListing::ByDateRange(DateRangeTotal {
                start_date: start_raw.to_string(),
                end_date: end_raw.to_string(),
                total_expenses,
            }));
        }

        Ok(ExpenseListing::All(expenses))
    }

    /// List every expense in stored order
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        let _guard = self.store.lock();
        self.store.load()
    }

    /// Get an expense by its textual identifier
    pub fn get(&self, identifier: &str) -> ExpenseResult<Expense> {
        let id = ExpenseId::parse(identifier)?;

        let _guard = self.store.lock();
        self.store
            .load()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(identifier))
    }

    /// Create a new expense, returning the full updated collection
    pub fn create(&self, input: NewExpense) -> ExpenseResult<Vec<Expense>> {
        let _guard = self.store.lock();
        let mut expenses = self.store.load()?;

        let id = next_id(&expenses)?;
        let expense = input
            .into_expense(id, Utc::now())
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        debug!(id = %expense.id, category = %expense.category, "creating expense");
        expenses.push(expense);
        self.store.save(expenses)
    }

    /// Update an expense in place, returning the full updated collection
    pub fn update(&self, identifier: &str, update: &ExpenseUpdate) -> ExpenseResult<Vec<Expense>> {
        let id = ExpenseId::parse(identifier)?;

        let _guard = self.store.lock();
        let mut expenses = self.store.load()?;

        let expense = expenses
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(identifier))?;

        expense
            .apply(update)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        debug!(id = %id, "updated expense");
        self.store.save(expenses)
    }

    /// Delete an expense, returning the remaining collection
    pub fn delete(&self, identifier: &str) -> ExpenseResult<Vec<Expense>> {
        let id = ExpenseId::parse(identifier)?;

        let _guard = self.store.lock();
        let mut expenses = self.store.load()?;

        let index = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ExpenseError::expense_not_found(identifier))?;

        expenses.remove(index);
        debug!(id = %id, "deleted expense");
        self.store.save(expenses)
    }
}

/// Identifier for the next expense: one past the highest in use
fn next_id(expenses: &[Expense]) -> ExpenseResult<ExpenseId> {
    match expenses.iter().map(|e| e.id).max() {
        None => Ok(ExpenseId::first()),
        Some(highest) => highest
            .checked_next()
            .ok_or_else(|| ExpenseError::Validation(format!("No id left after {}", highest))),
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a range bound given as an RFC 3339 timestamp, a naive timestamp
/// (taken as UTC), or a bare date. A bare date means midnight UTC at either end.
fn parse_bound(raw: &str) -> ExpenseResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ExpenseError::Validation(format!("Invalid date: {}", raw)))?;

    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
