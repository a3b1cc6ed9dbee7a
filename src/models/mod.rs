//! Core data models for the expense tracker
//!
//! This module contains the expense record, the inputs accepted when creating
//! or updating one, and the results of aggregate queries.

pub mod expense;
pub mod ids;
pub mod summary;

pub use expense::{Expense, ExpenseUpdate, ExpenseValidationError, NewExpense};
pub use ids::ExpenseId;
pub use summary::{CategoryTotal, DateRangeTotal, ExpenseListing};
