//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and totals for the command line.

pub mod expense;

pub use expense::{format_expense_details, format_expense_list, format_listing};
